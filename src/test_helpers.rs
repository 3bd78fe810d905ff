//! Shared test utilities for the devfolio test suite.
//!
//! Builds a small content tree in a temp directory (real PNG screenshots,
//! generated with `image`) and provides lookups over scan-phase data.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let gallery = find_gallery(&manifest, "gojo");
//! assert_eq!(gallery_files(gallery), vec!["010-home.png", "020-search-page.png", "030-Detail View.png"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::ProjectGallery;

/// `portfolio.toml` of the fixture tree.
///
/// - `gojo` discovers its screenshots from disk (NNN-prefixed, one with a space)
/// - `movie-chief` lists its screenshots explicitly, cover without prefix
pub const FIXTURE_PORTFOLIO: &str = r#"
[profile]
name = "Ada Example"
role = "Full Stack Developer"
photo = "profile.png"
bio = "I build **web applications**."
tagline = "Open to work"

[[links]]
kind = "github"
label = "GitHub"
url = "https://github.com/example"

[[links]]
kind = "email"
label = "Email"
url = "ada@example.com"

[[projects]]
id = "gojo"
name = "GOJO"
description = "home"
subtitle = "Rental marketplace"

[[projects]]
id = "movie-chief"
name = "Movie Chief"
title = "Movie Chief - streaming guide"
description = "home_page"
subtitle = "Find where to watch"
images = ["home_page.png", "details.png"]

[[skills]]
title = "Frontend"
accent = "blue"
items = ["TypeScript", "React"]

[[skills]]
title = "Databases"
accent = "yellow"
items = ["PostgreSQL"]

[[experience]]
title = "Senior Developer"
company = "Example Corp"
period = "2021 - Present"
description = "Rebuilt the dashboard."
skills = ["React"]

[[experience]]
title = "Developer"
company = "Startup Ltd"
period = "2018 - 2021"
description = "Shipped the mobile API."
skills = ["Node.js", "PostgreSQL"]
"#;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write the fixture content tree to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join("portfolio.toml"), FIXTURE_PORTFOLIO).unwrap();
    write_png(&root.join("profile.png"), 8, 8);

    let gojo = root.join("projects/gojo");
    fs::create_dir_all(&gojo).unwrap();
    write_png(&gojo.join("020-search-page.png"), 32, 20);
    write_png(&gojo.join("010-home.png"), 40, 25);
    write_png(&gojo.join("030-Detail View.png"), 16, 10);
    fs::write(gojo.join("notes.txt"), "not a screenshot").unwrap();
    fs::write(gojo.join(".DS_Store"), "").unwrap();

    let movie = root.join("projects/movie-chief");
    fs::create_dir_all(&movie).unwrap();
    write_png(&movie.join("home_page.png"), 24, 24);
    write_png(&movie.join("details.png"), 12, 30);
    // Not listed in portfolio.toml, so not part of the gallery.
    write_png(&movie.join("unused.png"), 4, 4);

    tmp
}

/// Write a solid-color PNG of the given size.
pub fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]))
        .save(path)
        .unwrap();
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a gallery by project id. Panics if not found.
pub fn find_gallery<'a>(manifest: &'a Manifest, project_id: &str) -> &'a ProjectGallery {
    manifest
        .galleries
        .iter()
        .find(|g| g.project_id == project_id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = manifest
                .galleries
                .iter()
                .map(|g| g.project_id.as_str())
                .collect();
            panic!("gallery '{project_id}' not found. Available: {ids:?}")
        })
}

/// Screenshot filenames in gallery order.
pub fn gallery_files(gallery: &ProjectGallery) -> Vec<&str> {
    gallery.images.iter().map(|i| i.file.as_str()).collect()
}
