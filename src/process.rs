//! Screenshot probing and publishing.
//!
//! Stage 2 of the devfolio build pipeline. Takes the manifest from the scan
//! stage and, for every screenshot:
//!
//! - reads its pixel size, so the page can reserve space before it loads;
//! - copies it to its published location under the output directory, unless
//!   `assets.image_path_template` points at an external host.
//!
//! The profile photo is copied to the output root the same way.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── .copy-manifest.json        # Source hashes of published files
//! ├── profile.jpg
//! └── projects/
//!     └── gojo/
//!         ├── 010-home.png
//!         └── 020-search-page.png
//! ```
//!
//! The updated manifest (with dimensions) is written by the caller to
//! `<temp>/processed/manifest.json`.
//!
//! ## Parallel Processing
//!
//! Screenshots of each project are handled in parallel on the global
//! [rayon](https://docs.rs/rayon) pool; the caller sizes it from
//! `processing.max_processes`.

use crate::assets::ImagePathResolver;
use crate::cache::{self, CopyManifest, CopyStats};
use crate::scan::{Manifest, gallery_dir};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
}

/// What happened to one published file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    /// Published copy already matches the source.
    Unchanged,
    /// Served from another host; nothing copied.
    External,
}

/// Progress events emitted while processing.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    ProjectStarted {
        title: String,
        image_count: usize,
    },
    ImageProcessed {
        /// 1-based position in the gallery.
        index: usize,
        file: String,
        dimensions: Option<(u32, u32)>,
        status: CopyStatus,
    },
}

pub struct ProcessResult {
    pub manifest: Manifest,
    pub copy_stats: CopyStats,
}

/// Result of handling one screenshot on a worker thread.
struct Probed {
    dimensions: Option<(u32, u32)>,
    status: CopyStatus,
    published: Option<(String, String)>,
}

pub fn process(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let manifest_content = std::fs::read_to_string(manifest_path)?;
    let mut manifest: Manifest = serde_json::from_str(&manifest_content)?;

    std::fs::create_dir_all(output_dir)?;

    let mut cache = if use_cache {
        CopyManifest::load(output_dir)
    } else {
        CopyManifest::empty()
    };
    let mut stats = CopyStats::default();
    let resolver = ImagePathResolver::new(&manifest.config.assets.image_path_template);

    for gallery in &mut manifest.galleries {
        if let Some(tx) = &progress {
            tx.send(ProcessEvent::ProjectStarted {
                title: gallery.title.clone(),
                image_count: gallery.images.len(),
            })
            .ok();
        }

        let source_dir = gallery_dir(source_root, &gallery.project_id);
        let project_id = gallery.project_id.as_str();
        let cache_ref = &cache;

        let probed: Vec<Probed> = gallery
            .images
            .par_iter()
            .map(|image| {
                let source = source_dir.join(&image.file);
                let published = resolver.local_path(project_id, &image.file);
                publish(&source, published.as_deref(), output_dir, cache_ref)
            })
            .collect::<Result<_, _>>()?;

        for (i, (image, result)) in gallery.images.iter_mut().zip(probed).enumerate() {
            image.dimensions = result.dimensions;
            tally(&mut stats, result.status);
            if let Some((published, hash)) = result.published {
                cache.record(published, hash);
            }
            if let Some(tx) = &progress {
                tx.send(ProcessEvent::ImageProcessed {
                    index: i + 1,
                    file: image.file.clone(),
                    dimensions: result.dimensions,
                    status: result.status,
                })
                .ok();
            }
        }
    }

    let photo = &manifest.portfolio.profile.photo;
    let photo_result = publish(
        &source_root.join(photo),
        Some(Path::new(photo)),
        output_dir,
        &cache,
    )?;
    tally(&mut stats, photo_result.status);
    if let Some((published, hash)) = photo_result.published {
        cache.record(published, hash);
    }

    cache.save(output_dir)?;

    Ok(ProcessResult {
        manifest,
        copy_stats: stats,
    })
}

fn tally(stats: &mut CopyStats, status: CopyStatus) {
    match status {
        CopyStatus::Copied => stats.copied += 1,
        CopyStatus::Unchanged => stats.unchanged += 1,
        CopyStatus::External => {}
    }
}

/// Probe one file and copy it to `published` (relative to `output_dir`)
/// unless the cache says the copy is current.
fn publish(
    source: &Path,
    published: Option<&Path>,
    output_dir: &Path,
    cache: &CopyManifest,
) -> Result<Probed, ProcessError> {
    if !source.is_file() {
        return Err(ProcessError::SourceNotFound(source.to_path_buf()));
    }

    let dimensions = match image::image_dimensions(source) {
        Ok(dims) => Some(dims),
        Err(e) => {
            log::warn!("could not read size of {}: {e}", source.display());
            None
        }
    };

    let Some(published) = published else {
        return Ok(Probed {
            dimensions,
            status: CopyStatus::External,
            published: None,
        });
    };

    let key = manifest_key(published);
    let hash = cache::hash_file(source)?;
    let status = if cache.is_fresh(&key, &hash, output_dir) {
        CopyStatus::Unchanged
    } else {
        let target = output_dir.join(published);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, &target)?;
        log::debug!("copied {} -> {}", source.display(), target.display());
        CopyStatus::Copied
    };

    Ok(Probed {
        dimensions,
        status,
        published: Some((key, hash)),
    })
}

/// Copy manifest keys use `/` on every platform.
fn manifest_key(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
