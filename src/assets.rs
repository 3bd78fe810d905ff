//! Published locations of screenshots.
//!
//! Every screenshot lives at `content/projects/<id>/<file>` and is published
//! at the URL produced by `assets.image_path_template`. The `{id}` and `{file}`
//! placeholders are percent-encoded as single path segments, so a file called
//! `Home Page.png` stays a valid URL.
//!
//! A template that points at another host (`https://cdn.example.com/{id}/{file}`)
//! is external: the page links there and the process stage copies nothing.
//! Any other template is local and maps to a path under the output directory.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ImagePathResolver {
    template: String,
}

impl ImagePathResolver {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// URL the page uses for a screenshot.
    pub fn url(&self, project_id: &str, file: &str) -> String {
        self.template
            .replace("{id}", &urlencoding::encode(project_id))
            .replace("{file}", &urlencoding::encode(file))
    }

    /// Template points at another host.
    pub fn is_external(&self) -> bool {
        let t = self.template.to_ascii_lowercase();
        t.starts_with("http://") || t.starts_with("https://") || t.starts_with("//")
    }

    /// Where the screenshot is copied, relative to the output directory.
    /// `None` for external templates.
    pub fn local_path(&self, project_id: &str, file: &str) -> Option<PathBuf> {
        if self.is_external() {
            return None;
        }
        let filled = self
            .template
            .replace("{id}", project_id)
            .replace("{file}", file);
        Some(
            filled
                .split('/')
                .filter(|segment| !segment.is_empty() && *segment != ".")
                .collect(),
        )
    }
}

/// URL of the runtime module with an optional `?v=` fingerprint.
pub fn runtime_url(runtime_script: &str, fingerprint: Option<&str>) -> String {
    let path = runtime_script.trim_start_matches("./");
    let base = if path.starts_with('/') || path.contains("://") {
        path.to_string()
    } else {
        format!("./{path}")
    };
    match fingerprint {
        Some(fp) => format!("{base}?v={fp}"),
        None => base,
    }
}
