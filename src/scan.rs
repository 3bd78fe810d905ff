//! Content scanning and manifest generation.
//!
//! Stage 1 of the devfolio build pipeline. Reads the content directory and
//! produces a [`Manifest`] that subsequent stages consume.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── portfolio.toml               # Profile, links, projects, skills, timeline
//! ├── profile.jpg                  # Profile photo (path set in portfolio.toml)
//! └── projects/
//!     ├── gojo/                    # One directory per project id
//!     │   ├── 010-home.png         # Discovered and sorted by NNN- prefix
//!     │   └── 020-search-page.png
//!     └── movie-chief/
//!         ├── home_page.png        # Or listed explicitly via `images = [...]`
//!         └── details.png
//! ```
//!
//! ## Validation
//!
//! On top of the checks in [`crate::content`], the scanner enforces:
//! - The profile photo exists
//! - Every project has at least one screenshot, and every listed one exists
//! - Every project's cover (`description`) names one of its screenshots

use crate::config::{self, SiteConfig};
use crate::content::{self, ContentError};
use crate::naming::{alt_text, parse_screenshot_name, screenshot_order};
use crate::types::{GalleryImage, Portfolio, Project, ProjectGallery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Screenshot directories live under this directory of the content root.
pub const PROJECTS_DIR: &str = "projects";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Profile photo not found: {0}")]
    MissingPhoto(PathBuf),
    #[error("Project {0:?} has no screenshots in {1}")]
    EmptyGallery(String, PathBuf),
    #[error("Project {project:?} lists a screenshot that does not exist: {path}")]
    MissingImage { project: String, path: PathBuf },
    #[error("Project {project:?}: cover {description:?} matches none of its screenshots")]
    MissingCover {
        project: String,
        description: String,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub portfolio: Portfolio,
    /// One gallery per project, in project order.
    pub galleries: Vec<ProjectGallery>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Uses defaults if config.toml doesn't exist
    let config = config::load_config(root)?;
    let portfolio = content::load_portfolio(root)?;

    let photo = root.join(&portfolio.profile.photo);
    if !photo.is_file() {
        return Err(ScanError::MissingPhoto(photo));
    }

    let galleries = portfolio
        .projects
        .iter()
        .map(|project| build_gallery(root, project))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Manifest {
        portfolio,
        galleries,
        config,
    })
}

/// Directory holding a project's screenshots.
pub fn gallery_dir(root: &Path, project_id: &str) -> PathBuf {
    root.join(PROJECTS_DIR).join(project_id)
}

fn build_gallery(root: &Path, project: &Project) -> Result<ProjectGallery, ScanError> {
    let dir = gallery_dir(root, &project.id);

    let files = match &project.images {
        Some(listed) => {
            for file in listed {
                let path = dir.join(file);
                if !path.is_file() {
                    return Err(ScanError::MissingImage {
                        project: project.id.clone(),
                        path,
                    });
                }
            }
            listed.clone()
        }
        None => discover_images(&dir)?,
    };

    if files.is_empty() {
        return Err(ScanError::EmptyGallery(project.id.clone(), dir));
    }

    let cover = resolve_cover(&files, &project.description).ok_or_else(|| {
        ScanError::MissingCover {
            project: project.id.clone(),
            description: project.description.clone(),
        }
    })?;

    let title = project.gallery_title().to_string();
    let images = files
        .iter()
        .enumerate()
        .map(|(i, file)| GalleryImage {
            alt: alt_text(file, &title, i + 1),
            file: file.clone(),
            dimensions: None,
        })
        .collect();

    log::debug!("project {}: {} screenshots", project.id, files.len());
    Ok(ProjectGallery {
        project_id: project.id.clone(),
        title,
        images,
        cover,
    })
}

/// Screenshots directly inside `dir`, in `NNN-` order. A missing directory
/// has no screenshots.
fn discover_images(dir: &Path) -> Result<Vec<String>, ScanError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().is_file() && !name.starts_with('.') && is_image(entry.path()) {
            files.push(name);
        }
    }
    files.sort_by(|a, b| screenshot_order(a, b));
    Ok(files)
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Index of the cover screenshot: the file whose stem is `description`
/// (`home` → `home.png`), else one whose stem is `NNN-description`.
pub fn resolve_cover(files: &[String], description: &str) -> Option<usize> {
    files
        .iter()
        .position(|f| parse_screenshot_name(f).stem == description)
        .or_else(|| {
            files.iter().position(|f| {
                let parsed = parse_screenshot_name(f);
                parsed.number.is_some()
                    && parsed.stem.split_once('-').map(|(_, rest)| rest) == Some(description)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;

    #[test]
    fn scan_builds_one_gallery_per_project() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let ids: Vec<&str> = manifest
            .galleries
            .iter()
            .map(|g| g.project_id.as_str())
            .collect();
        assert_eq!(ids, vec!["gojo", "movie-chief"]);
        assert_eq!(manifest.portfolio.projects.len(), 2);
    }

    #[test]
    fn discovered_screenshots_sorted_by_prefix() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let gojo = find_gallery(&manifest, "gojo");
        assert_eq!(
            gallery_files(gojo),
            vec!["010-home.png", "020-search-page.png", "030-Detail View.png"]
        );
    }

    #[test]
    fn non_images_and_hidden_files_skipped() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let files = gallery_files(find_gallery(&manifest, "gojo"));
        assert!(!files.contains(&"notes.txt"));
        assert!(!files.contains(&".DS_Store"));
    }

    #[test]
    fn listed_screenshots_keep_listed_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let movie = find_gallery(&manifest, "movie-chief");
        assert_eq!(gallery_files(movie), vec!["home_page.png", "details.png"]);
        assert_eq!(movie.title, "Movie Chief - streaming guide");
    }

    #[test]
    fn cover_resolved_through_prefix() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let gojo = find_gallery(&manifest, "gojo");
        assert_eq!(gojo.images[gojo.cover].file, "010-home.png");
    }

    #[test]
    fn alt_text_from_filenames() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let gojo = find_gallery(&manifest, "gojo");
        let alts: Vec<&str> = gojo.images.iter().map(|i| i.alt.as_str()).collect();
        assert_eq!(
            alts,
            vec!["GOJO - home", "GOJO - search page", "GOJO - Detail View"]
        );
    }

    #[test]
    fn scan_loads_config() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("config.toml"),
            "[carousel]\nscroll_step = 1.5\n",
        )
        .unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.carousel.scroll_step, 1.5);
    }

    #[test]
    fn missing_photo_is_error() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("profile.png")).unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::MissingPhoto(_))));
    }

    #[test]
    fn missing_listed_image_is_error() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("projects/movie-chief/details.png")).unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::MissingImage { project, .. }) if project == "movie-chief"
        ));
    }

    #[test]
    fn empty_gallery_is_error() {
        let tmp = setup_fixtures();
        fs::remove_dir_all(tmp.path().join("projects/gojo")).unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::EmptyGallery(id, _)) if id == "gojo"
        ));
    }

    #[test]
    fn unresolved_cover_is_error() {
        let tmp = setup_fixtures();
        let portfolio = FIXTURE_PORTFOLIO.replace("description = \"home\"", "description = \"landing\"");
        fs::write(tmp.path().join("portfolio.toml"), portfolio).unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::MissingCover { description, .. }) if description == "landing"
        ));
    }

    #[test]
    fn content_errors_propagate() {
        let tmp = setup_fixtures();
        let portfolio = FIXTURE_PORTFOLIO.replace("id = \"gojo\"", "id = \"movie-chief\"");
        fs::write(tmp.path().join("portfolio.toml"), portfolio).unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::Content(ContentError::DuplicateProjectId(_)))
        ));
    }

    #[test]
    fn manifest_roundtrips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.galleries.len(), 2);
        assert_eq!(back.portfolio.profile.name, "Ada Example");
    }

    // =========================================================================
    // resolve_cover
    // =========================================================================

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cover_exact_stem_wins() {
        let f = files(&["010-home.png", "home.jpg"]);
        assert_eq!(resolve_cover(&f, "home"), Some(1));
    }

    #[test]
    fn cover_matches_any_extension() {
        let f = files(&["a.png", "home_page.png.png", "home_page.webp"]);
        assert_eq!(resolve_cover(&f, "home_page"), Some(2));
    }

    #[test]
    fn cover_missing() {
        let f = files(&["a.png"]);
        assert_eq!(resolve_cover(&f, "home"), None);
    }
}
