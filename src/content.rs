//! `portfolio.toml` loading and validation.
//!
//! The portfolio file holds every piece of display data on the page: the
//! hero, outbound links, projects, skill groups and the experience timeline.
//! It is read once by the scan stage and never mutated afterwards.
//!
//! Checks here only look at the file itself. Checks that need the
//! filesystem (galleries, covers, the profile photo) live in [`crate::scan`].

use crate::naming::is_slug;
use crate::types::{LinkKind, Portfolio};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const PORTFOLIO_FILENAME: &str = "portfolio.toml";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("portfolio.toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid project id {0:?}: use lowercase letters, digits and dashes")]
    InvalidProjectId(String),
    #[error("Duplicate project id {0:?}")]
    DuplicateProjectId(String),
    #[error("Project {project:?} lists an invalid image name {file:?}")]
    InvalidImageName { project: String, file: String },
    #[error("Link {label:?}: {reason}")]
    InvalidLink { label: String, reason: String },
    #[error("Profile {0} must not be empty")]
    EmptyProfileField(&'static str),
    #[error("Profile photo {0:?} must be a relative path inside the content directory")]
    InvalidPhotoPath(String),
}

/// Read and validate `portfolio.toml` from the content root.
pub fn load_portfolio(root: &Path) -> Result<Portfolio, ContentError> {
    let path = root.join(PORTFOLIO_FILENAME);
    let text = fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let portfolio = parse_portfolio(&text)?;
    log::debug!(
        "loaded {} projects, {} skill groups, {} timeline entries",
        portfolio.projects.len(),
        portfolio.skills.len(),
        portfolio.experience.len()
    );
    Ok(portfolio)
}

pub fn parse_portfolio(text: &str) -> Result<Portfolio, ContentError> {
    let portfolio: Portfolio = toml::from_str(text)?;
    validate_portfolio(&portfolio)?;
    Ok(portfolio)
}

pub fn validate_portfolio(portfolio: &Portfolio) -> Result<(), ContentError> {
    let profile = &portfolio.profile;
    if profile.name.trim().is_empty() {
        return Err(ContentError::EmptyProfileField("name"));
    }
    if profile.photo.trim().is_empty() {
        return Err(ContentError::EmptyProfileField("photo"));
    }
    if !is_contained_path(&profile.photo) {
        return Err(ContentError::InvalidPhotoPath(profile.photo.clone()));
    }

    let mut seen = HashSet::new();
    for project in &portfolio.projects {
        if !is_slug(&project.id) {
            return Err(ContentError::InvalidProjectId(project.id.clone()));
        }
        if !seen.insert(project.id.as_str()) {
            return Err(ContentError::DuplicateProjectId(project.id.clone()));
        }
        for file in project.images.iter().flatten() {
            if !is_plain_filename(file) {
                return Err(ContentError::InvalidImageName {
                    project: project.id.clone(),
                    file: file.clone(),
                });
            }
        }
    }

    for link in &portfolio.links {
        check_link(link.kind, &link.url).map_err(|reason| ContentError::InvalidLink {
            label: link.label.clone(),
            reason: reason.to_string(),
        })?;
    }
    Ok(())
}

/// A single path component: no separators, not `.` or `..`.
pub fn is_plain_filename(file: &str) -> bool {
    !file.is_empty() && file != "." && file != ".." && !file.contains(['/', '\\'])
}

/// Relative path with no `..` components, so it stays under the content root
/// and lands under the output root when published.
fn is_contained_path(path: &str) -> bool {
    !path.starts_with(['/', '\\'])
        && !path.contains("://")
        && path
            .split(['/', '\\'])
            .all(|part| part != ".." && !part.contains(':'))
}

fn check_link(kind: LinkKind, url: &str) -> Result<(), &'static str> {
    match kind {
        LinkKind::Email => {
            let address = url.strip_prefix("mailto:").unwrap_or(url);
            if address.contains('@') && !address.contains("://") {
                Ok(())
            } else {
                Err("email links need an address like name@example.com")
            }
        }
        _ => {
            if url.starts_with("https://") || url.starts_with("http://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        }
    }
}

/// A documented starter `portfolio.toml`.
///
/// Used by the `gen-content` CLI command.
pub fn starter_portfolio_toml() -> &'static str {
    r##"# Devfolio content
# ================
# Everything shown on the page comes from this file. Screenshots live in
# projects/<id>/ next to it, the profile photo wherever `photo` points.

[profile]
name = "Ada Example"
role = "Full Stack Developer"
# Relative to the content directory; copied to the output root.
photo = "profile.jpg"
# Markdown.
bio = """
I build web applications end to end, from database schema to the last
pixel of the UI.
"""
tagline = "Available for freelance work"
# Footer line. Defaults to the name.
# copyright = "Ada Example"

# Footer links. kind is one of: linkedin, github, upwork, email, website.
[[links]]
kind = "github"
label = "GitHub"
url = "https://github.com/example"

[[links]]
kind = "email"
label = "Email"
url = "ada@example.com"

# Carousel projects, in display order.
# id:          lowercase slug; screenshots are read from projects/<id>/
# description: stem of the cover screenshot (home -> home.png)
# images:      optional explicit order; otherwise files are discovered and
#              sorted by their NNN- prefix (010-home.png, 020-search.png)
[[projects]]
id = "notes"
name = "Notes"
description = "home"
subtitle = "Collaborative note taking"
# title = "Notes - shared notebooks"
# images = ["home.png", "editor.png"]

# Skill groups. accent is one of: blue, purple, green, red, yellow, indigo, pink.
[[skills]]
title = "Frontend"
accent = "blue"
items = ["TypeScript", "React", "CSS"]

# Experience timeline, newest first.
[[experience]]
title = "Senior Developer"
company = "Example Corp"
period = "2021 - Present"
description = "Led the rebuild of the customer dashboard."
skills = ["React", "PostgreSQL"]
"##
}
