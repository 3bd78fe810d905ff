//! Screenshot filename and project id conventions.
//!
//! Screenshots discovered on disk are ordered by an optional numeric prefix,
//! the `NNN-name` convention:
//!
//! - `010-home.png` sorts before `020-search.png`
//! - prefixed files sort before unprefixed ones, which sort by filename
//!
//! The prefix and extension are dropped to build alt text, and dashes and
//! underscores become spaces:
//! - `020-Search-Page.png` → "Search Page"
//! - `property_detail.png` → "property detail"
//! - `Home Page.png` → "Home Page"

use std::cmp::Ordering;
use std::path::Path;

/// A screenshot filename split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotName {
    /// Number prefix if present (`20` from `020-search.png`).
    pub number: Option<u32>,
    /// Filename without extension, prefix kept (`020-search`).
    pub stem: String,
    /// Human label for alt text (`search`).
    pub label: String,
}

/// Parse a screenshot filename.
pub fn parse_screenshot_name(file: &str) -> ScreenshotName {
    let stem = Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());

    let (number, rest) = match stem.split_once('-') {
        Some((prefix, rest)) if is_number(prefix) => (prefix.parse().ok(), rest.to_string()),
        _ if is_number(&stem) => (stem.parse().ok(), String::new()),
        _ => (None, stem.clone()),
    };

    ScreenshotName {
        number,
        label: rest.replace(['-', '_'], " ").trim().to_string(),
        stem,
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Display order for discovered screenshots.
pub fn screenshot_order(a: &str, b: &str) -> Ordering {
    let pa = parse_screenshot_name(a);
    let pb = parse_screenshot_name(b);
    let key = |p: &ScreenshotName| p.number.unwrap_or(u32::MAX);
    key(&pa).cmp(&key(&pb)).then_with(|| a.cmp(b))
}

/// Alt text for a screenshot: its label, or the gallery title with a
/// position when the filename carries no words (`001.png`).
pub fn alt_text(file: &str, gallery_title: &str, position: usize) -> String {
    let parsed = parse_screenshot_name(file);
    if parsed.label.is_empty() {
        format!("{gallery_title} - screenshot {position}")
    } else {
        format!("{gallery_title} - {}", parsed.label)
    }
}

/// Project ids double as directory names and URL segments: lowercase ASCII
/// letters, digits and dashes, starting with a letter or digit.
pub fn is_slug(id: &str) -> bool {
    let mut bytes = id.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_lowercase() || b.is_ascii_digit() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
