//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (project, screenshot, timeline entry) is its semantic
//! identity: positional index and name. Filesystem paths are secondary context
//! on indented `Source:` lines, so the output reads as a content inventory
//! while still tracing back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Profile
//!     Ada Example, Full Stack Developer
//!         Photo: profile.png
//!
//! Projects
//! 001 GOJO (3 screenshots)
//!     Source: projects/gojo/
//!     001 home (cover)
//!         Source: 010-home.png
//!     002 search page
//!         Source: 020-search-page.png
//!
//! Skills
//!     001 Frontend [blue] (2 skills)
//!
//! Experience
//!     001 Senior Developer, Example Corp (2021 - Present)
//!
//! Links
//!     001 GitHub → https://github.com/example
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Process
//!
//! ```text
//! GOJO (3 screenshots)
//!     001 010-home.png (40x25): copied
//!     002 020-search-page.png (32x20): unchanged
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!     001 GOJO → 3 slides
//!     002 Movie Chief → 2 slides
//!
//! Generated 1 page: 2 projects, 5 screenshots, 2 skill groups, 2 timeline entries
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::naming::parse_screenshot_name;
use crate::scan::{Manifest, PROJECTS_DIR};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + name, with optional
/// screenshot count.
///
/// ```text
/// 001 GOJO (3 screenshots)
/// 002 Frontend
/// ```
fn entity_header(index: usize, name: &str, screenshots: Option<usize>) -> String {
    match screenshots {
        Some(1) => format!("{} {} (1 screenshot)", format_index(index), name),
        Some(n) => format!("{} {} ({} screenshots)", format_index(index), name, n),
        None => format!("{} {}", format_index(index), name),
    }
}

/// Format a screenshot line: labelled files show the label, unlabelled ones
/// (`010.png`) show the filename in parens.
fn screenshot_line(index: usize, file: &str) -> String {
    let label = parse_screenshot_name(file).label;
    if label.is_empty() {
        format!("{} ({})", format_index(index), file)
    } else {
        format!("{} {}", format_index(index), label)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn format_dimensions(dimensions: Option<(u32, u32)>) -> String {
    match dimensions {
        Some((w, h)) => format!(" ({}x{})", w, h),
        None => String::new(),
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered portfolio content.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let portfolio = &manifest.portfolio;
    let mut lines = Vec::new();

    lines.push("Profile".to_string());
    lines.push(format!(
        "    {}, {}",
        portfolio.profile.name, portfolio.profile.role
    ));
    lines.push(format!("        Photo: {}", portfolio.profile.photo));
    let bio = truncate_desc(portfolio.profile.bio.trim(), 60);
    if !bio.is_empty() {
        lines.push(format!("        {}", bio));
    }

    lines.push(String::new());
    lines.push("Projects".to_string());
    for (i, project) in portfolio.projects.iter().enumerate() {
        let Some(gallery) = manifest
            .galleries
            .iter()
            .find(|g| g.project_id == project.id)
        else {
            lines.push(entity_header(i + 1, &project.name, None));
            continue;
        };
        lines.push(entity_header(
            i + 1,
            &project.name,
            Some(gallery.images.len()),
        ));
        lines.push(format!("    Source: {}/{}/", PROJECTS_DIR, project.id));
        if gallery.title != project.name {
            lines.push(format!("    Title: {}", gallery.title));
        }
        for (j, image) in gallery.images.iter().enumerate() {
            let cover = if j == gallery.cover { " (cover)" } else { "" };
            lines.push(format!("    {}{}", screenshot_line(j + 1, &image.file), cover));
            lines.push(format!("        Source: {}", image.file));
        }
    }

    if !portfolio.skills.is_empty() {
        lines.push(String::new());
        lines.push("Skills".to_string());
        for (i, group) in portfolio.skills.iter().enumerate() {
            lines.push(format!(
                "    {} {} [{}] ({} skills)",
                format_index(i + 1),
                group.title,
                group.accent.as_str(),
                group.items.len()
            ));
        }
    }

    if !portfolio.experience.is_empty() {
        lines.push(String::new());
        lines.push("Experience".to_string());
        for (i, entry) in portfolio.experience.iter().enumerate() {
            lines.push(format!(
                "    {} {}, {} ({})",
                format_index(i + 1),
                entry.title,
                entry.company,
                entry.period
            ));
        }
    }

    if !portfolio.links.is_empty() {
        lines.push(String::new());
        lines.push("Links".to_string());
        for (i, link) in portfolio.links.iter().enumerate() {
            lines.push(format!(
                "    {} {} \u{2192} {}",
                format_index(i + 1),
                link.label,
                link.href()
            ));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (stock defaults)".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Process output
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &crate::process::ProcessEvent) -> Vec<String> {
    use crate::process::{CopyStatus, ProcessEvent};
    match event {
        ProcessEvent::ProjectStarted { title, image_count } => {
            let noun = if *image_count == 1 {
                "screenshot"
            } else {
                "screenshots"
            };
            vec![format!("{} ({} {})", title, image_count, noun)]
        }
        ProcessEvent::ImageProcessed {
            index,
            file,
            dimensions,
            status,
        } => {
            let status_str = match status {
                CopyStatus::Copied => "copied",
                CopyStatus::Unchanged => "unchanged",
                CopyStatus::External => "external",
            };
            vec![format!(
                "    {} {}{}: {}",
                format_index(*index),
                file,
                format_dimensions(*dimensions),
                status_str
            )]
        }
    }
}

// ============================================================================
// Stage 3: Generate output
// ============================================================================

/// Format generate stage output showing what went into the page.
pub fn format_generate_output(manifest: &Manifest) -> Vec<String> {
    let portfolio = &manifest.portfolio;
    let mut lines = vec!["Home \u{2192} index.html".to_string()];
    let mut total_screenshots = 0;

    for (i, project) in portfolio.projects.iter().enumerate() {
        let slides = manifest
            .galleries
            .iter()
            .find(|g| g.project_id == project.id)
            .map_or(0, |g| g.images.len());
        total_screenshots += slides;
        lines.push(format!(
            "{}{} \u{2192} {} {}",
            indent(1),
            entity_header(i + 1, &project.name, None),
            slides,
            if slides == 1 { "slide" } else { "slides" }
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated 1 page: {} projects, {} screenshots, {} skill groups, {} timeline entries",
        portfolio.projects.len(),
        total_screenshots,
        portfolio.skills.len(),
        portfolio.experience.len()
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest) {
    for line in format_generate_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
