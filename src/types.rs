//! Portfolio content types shared across all pipeline stages.
//!
//! These types are read from `portfolio.toml`, serialized to JSON between
//! stages (scan → process → generate), and never mutated after loading.

use serde::{Deserialize, Serialize};

/// Everything `portfolio.toml` describes, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

/// The hero section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub role: String,
    /// Profile photo, relative to the content root.
    pub photo: String,
    /// Markdown.
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Footer line; defaults to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Kind of outbound link; picks the footer icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Linkedin,
    Github,
    Upwork,
    Email,
    Website,
}

/// An outbound profile link or mail address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub kind: LinkKind,
    pub label: String,
    /// `http(s)://` URL, or a bare address for [`LinkKind::Email`].
    pub url: String,
}

impl Link {
    /// The `href` to render.
    pub fn href(&self) -> String {
        match self.kind {
            LinkKind::Email if !self.url.starts_with("mailto:") => format!("mailto:{}", self.url),
            _ => self.url.clone(),
        }
    }
}

/// A project shown in the carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    /// Slug key; also the screenshot directory name.
    pub id: String,
    pub name: String,
    /// Stem of the cover screenshot (`home` → `home.png`).
    pub description: String,
    /// One-line summary under the card title.
    pub subtitle: String,
    /// Slideshow title; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Screenshot filenames in order. Discovered from disk when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Project {
    pub fn gallery_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Accent palette for skill groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Blue,
    Purple,
    Green,
    Red,
    Yellow,
    Indigo,
    Pink,
}

impl Accent {
    pub fn as_str(self) -> &'static str {
        match self {
            Accent::Blue => "blue",
            Accent::Purple => "purple",
            Accent::Green => "green",
            Accent::Red => "red",
            Accent::Yellow => "yellow",
            Accent::Indigo => "indigo",
            Accent::Pink => "pink",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub title: String,
    #[serde(default)]
    pub accent: Accent,
    pub items: Vec<String>,
}

/// A timeline entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Ordered screenshots of one project, resolved by the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectGallery {
    pub project_id: String,
    pub title: String,
    pub images: Vec<GalleryImage>,
    /// Index into `images` of the carousel cover.
    pub cover: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub file: String,
    pub alt: String,
    /// Pixel size, filled in by the process stage when readable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}
