//! HTML page generation.
//!
//! Stage 3 of the devfolio build pipeline. Takes the processed manifest and
//! renders the single-page portfolio to `<output>/index.html`.
//!
//! ## Page Sections
//!
//! - **Scroll progress**: fixed bar along the top edge
//! - **Hero** (`#hero`): photo, name, role, Markdown bio, call-to-action links
//! - **Projects** (`#projects`): carousel of project cards, rendered twice
//!   over so the strip can loop seamlessly
//! - **Skills** (`#skills`): accented skill groups
//! - **Experience** (`#experience`): alternating timeline
//! - **Footer**: outbound links with icons, copyright line
//! - **Slideshow**: hidden dialog shell the runtime fills in
//!
//! Without the wasm runtime the page still reads top to bottom: the carousel
//! is a native horizontal scroller and every timeline entry is visible.
//!
//! ## Runtime Wiring
//!
//! Widget settings and gallery URLs are serialized into
//! `<script type="application/json" id="devfolio-data">` (see
//! [`crate::payload`]), and a module script imports `assets.runtime_script`
//! and calls its default export. When that file already exists in the output
//! directory its URL carries a content fingerprint for cache busting.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::assets::{ImagePathResolver, runtime_url};
use crate::cache;
use crate::config::{self, SiteConfig};
use crate::payload::{GalleryPayload, PAYLOAD_ELEMENT_ID, RuntimePayload, SlidePayload};
use crate::scan::Manifest;
use crate::types::{Experience, LinkKind, Portfolio, ProjectGallery, SkillGroup};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Render `index.html` from the processed manifest. Returns the manifest for
/// reporting.
pub fn generate(manifest_path: &Path, output_dir: &Path) -> Result<Manifest, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;

    let runtime_script = &manifest.config.assets.runtime_script;
    let runtime_path = output_dir.join(runtime_script);
    let fingerprint = if runtime_path.is_file() {
        Some(cache::fingerprint(&runtime_path)?)
    } else {
        log::warn!(
            "runtime module {} not found in output; the page will load without widgets until it is built",
            runtime_script
        );
        None
    };
    let script_url = runtime_url(runtime_script, fingerprint.as_deref());

    let page = render_page(&manifest, &script_url)?;
    fs::write(output_dir.join("index.html"), page.into_string())?;
    Ok(manifest)
}

/// Runtime data for the page.
pub fn build_payload(manifest: &Manifest) -> RuntimePayload {
    let resolver = ImagePathResolver::new(&manifest.config.assets.image_path_template);
    let galleries = manifest
        .galleries
        .iter()
        .map(|gallery| {
            let images = gallery
                .images
                .iter()
                .map(|image| SlidePayload {
                    url: resolver.url(&gallery.project_id, &image.file),
                    alt: image.alt.clone(),
                    width: image.dimensions.map(|(w, _)| w),
                    height: image.dimensions.map(|(_, h)| h),
                })
                .collect();
            (
                gallery.project_id.clone(),
                GalleryPayload {
                    title: gallery.title.clone(),
                    images,
                },
            )
        })
        .collect();

    RuntimePayload {
        carousel: manifest.config.carousel.clone(),
        slideshow: manifest.config.slideshow.clone(),
        timeline: manifest.config.timeline.clone(),
        projects: manifest
            .portfolio
            .projects
            .iter()
            .map(|p| p.id.clone())
            .collect(),
        galleries,
    }
}

fn render_page(manifest: &Manifest, script_url: &str) -> Result<Markup, GenerateError> {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&manifest.config.colors),
        CSS_STATIC
    );
    let payload = build_payload(manifest).to_script_json()?;
    let loader = format!(
        "import init from {};\ninit();",
        serde_json::to_string(script_url)?.replace('<', "\\u003c")
    );

    let portfolio = &manifest.portfolio;
    let title = format!("{} - {}", portfolio.profile.name, portfolio.profile.role);
    let content = html! {
        div.scroll-progress aria-hidden="true" {
            div.scroll-progress-bar style="width: 0%" {}
        }
        main {
            (render_hero(portfolio))
            (render_projects(manifest))
            @if !portfolio.skills.is_empty() {
                (render_skills(&portfolio.skills))
            }
            @if !portfolio.experience.is_empty() {
                (render_timeline(&portfolio.experience, &manifest.config))
            }
        }
        (render_footer(portfolio))
        (render_slideshow_shell())
        script type="application/json" id=(PAYLOAD_ELEMENT_ID) { (PreEscaped(payload)) }
        script type="module" { (PreEscaped(loader)) }
    };

    Ok(base_document(&title, &portfolio.profile.role, &css, content))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, description: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn markdown_to_html(source: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(source));
    out
}

fn render_hero(portfolio: &Portfolio) -> Markup {
    let profile = &portfolio.profile;
    html! {
        section #hero .hero {
            img.profile-photo src=(profile.photo) alt=(profile.name) width="160" height="160";
            h1 { (profile.name) }
            p.role { (profile.role) }
            @if let Some(tagline) = &profile.tagline {
                p.tagline { (tagline) }
            }
            div.bio { (PreEscaped(markdown_to_html(&profile.bio))) }
            nav.hero-cta {
                a.button href="#projects" { "View Projects" }
                a.button.secondary href="#experience" { "Experience" }
            }
        }
    }
}

/// Carousel markup: every project twice, so card `k` shows project `k mod N`.
fn render_projects(manifest: &Manifest) -> Markup {
    let resolver = ImagePathResolver::new(&manifest.config.assets.image_path_template);
    let projects = &manifest.portfolio.projects;
    let n = projects.len();

    html! {
        section #projects .projects {
            h2 { "Projects" }
            @if n == 0 {
                p.empty { "No projects yet." }
            } @else {
                div.carousel data-carousel {
                    div.carousel-track {
                        @for k in 0..(2 * n) {
                            @let project = &projects[k % n];
                            @let gallery = gallery_for(&manifest.galleries, &project.id);
                            @let duplicate = k >= n;
                            article.project-card
                                data-card-index=(k)
                                data-project-id=(project.id)
                                role="button"
                                tabindex=(if duplicate { "-1" } else { "0" })
                                aria-hidden=[duplicate.then_some("true")]
                                aria-label={ "Open " (project.gallery_title()) " screenshots" } {
                                @if let Some(gallery) = gallery {
                                    (render_cover(&resolver, gallery))
                                }
                                div.project-info {
                                    h3 { (project.name) }
                                    p.project-subtitle { (project.subtitle) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn gallery_for<'a>(galleries: &'a [ProjectGallery], id: &str) -> Option<&'a ProjectGallery> {
    galleries.iter().find(|g| g.project_id == id)
}

fn render_cover(resolver: &ImagePathResolver, gallery: &ProjectGallery) -> Markup {
    let Some(cover) = gallery.images.get(gallery.cover) else {
        return html! {};
    };
    let (width, height) = cover.dimensions.unzip();
    html! {
        img.project-cover
            src=(resolver.url(&gallery.project_id, &cover.file))
            alt=(cover.alt)
            width=[width]
            height=[height]
            loading="lazy"
            draggable="false";
    }
}

fn render_skills(groups: &[SkillGroup]) -> Markup {
    html! {
        section #skills .skills {
            h2 { "Skills" }
            div.skills-grid {
                @for group in groups {
                    div.skill-group data-accent=(group.accent.as_str()) {
                        h3 { (group.title) }
                        ul.skill-list {
                            @for item in &group.items {
                                li.skill-badge { (item) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Alternating timeline. Entries carry `is-visible` up front when they start
/// visible, so the page is complete without the runtime.
fn render_timeline(entries: &[Experience], config: &SiteConfig) -> Markup {
    let start_visible = config.timeline.start_visible;
    html! {
        section #experience .timeline {
            h2 { "Experience" }
            ol.timeline-list {
                @for (i, entry) in entries.iter().enumerate() {
                    @let side = if i % 2 == 0 { "left" } else { "right" };
                    @let class = if start_visible {
                        format!("timeline-entry {side} is-visible")
                    } else {
                        format!("timeline-entry {side}")
                    };
                    li class=(class) data-index=(i) {
                        div.timeline-card {
                            h3 { (entry.title) }
                            p.company { (entry.company) }
                            p.period { (entry.period) }
                            p.description { (entry.description) }
                            @if !entry.skills.is_empty() {
                                ul.timeline-skills {
                                    @for skill in &entry.skills {
                                        li { (skill) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_footer(portfolio: &Portfolio) -> Markup {
    let copyright = portfolio
        .profile
        .copyright
        .as_deref()
        .unwrap_or(&portfolio.profile.name);
    html! {
        footer.site-footer {
            @if !portfolio.links.is_empty() {
                h2 { "Let's Connect" }
                ul.social-links {
                    @for link in &portfolio.links {
                        @let external = link.kind != LinkKind::Email;
                        li {
                            a href=(link.href())
                                target=[external.then_some("_blank")]
                                rel=[external.then_some("noopener noreferrer")]
                                aria-label=(link.label) {
                                (link_icon(link.kind))
                                span.sr-only { (link.label) }
                            }
                        }
                    }
                }
            }
            p.copyright { "© " (copyright) }
        }
    }
}

fn link_icon(kind: LinkKind) -> Markup {
    let path = match kind {
        LinkKind::Linkedin => "M4 9h4v11H4zM6 3.5a2 2 0 1 1 0 4 2 2 0 0 1 0-4zM10 9h4v1.6c.6-1 1.9-1.9 3.6-1.9 3.1 0 3.4 2 3.4 4.6V20h-4v-5.8c0-1.4 0-2.9-1.8-2.9s-2.2 1.4-2.2 2.8V20h-3z",
        LinkKind::Github => "M12 2a10 10 0 0 0-3.2 19.5c.5.1.7-.2.7-.5v-1.7c-2.8.6-3.4-1.3-3.4-1.3-.5-1.2-1.1-1.5-1.1-1.5-.9-.6.1-.6.1-.6 1 .1 1.5 1 1.5 1 .9 1.5 2.4 1.1 2.9.8.1-.7.4-1.1.6-1.3-2.2-.3-4.6-1.1-4.6-5 0-1.1.4-2 1-2.7-.1-.3-.4-1.3.1-2.7 0 0 .8-.3 2.7 1a9.4 9.4 0 0 1 5 0c1.9-1.3 2.7-1 2.7-1 .5 1.4.2 2.4.1 2.7.6.7 1 1.6 1 2.7 0 3.9-2.3 4.7-4.6 5 .4.3.7.9.7 1.9V21c0 .3.2.6.7.5A10 10 0 0 0 12 2z",
        LinkKind::Upwork => "M17.5 7c-2.3 0-3.9 1.5-4.6 4-.7-1.3-1.3-2.8-1.6-4H8.9v5.2a2 2 0 0 1-4 0V7H2.5v5.2a4.4 4.4 0 0 0 8.8 0v-.9c.3.6.7 1.3 1.1 1.9L11 20h2.5l.9-4.3c.9.5 1.9.8 3.1.8a4.7 4.7 0 0 0 0-9.5zm0 7.1c-.9 0-1.8-.4-2.5-1l.2-1c.3-1.3 1-2.7 2.3-2.7a2.3 2.3 0 0 1 0 4.7z",
        LinkKind::Email => "M3 5h18a1 1 0 0 1 1 1v12a1 1 0 0 1-1 1H3a1 1 0 0 1-1-1V6a1 1 0 0 1 1-1zm1 2.2V17h16V7.2l-8 5.3z M4.6 7h14.8L12 11.9z",
        LinkKind::Website => "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm6.9 9h-3a15 15 0 0 0-1.3-5.6A8 8 0 0 1 18.9 11zM12 4.1c.9 1.2 1.8 3.7 1.9 6.9h-3.8c.1-3.2 1-5.7 1.9-6.9zM9.4 5.4A15 15 0 0 0 8.1 11h-3a8 8 0 0 1 4.3-5.6zM5.1 13h3a15 15 0 0 0 1.3 5.6A8 8 0 0 1 5.1 13zm6.9 6.9c-.9-1.2-1.8-3.7-1.9-6.9h3.8c-.1 3.2-1 5.7-1.9 6.9zm2.6-1.3a15 15 0 0 0 1.3-5.6h3a8 8 0 0 1-4.3 5.6z",
    };
    html! {
        svg.icon viewBox="0 0 24 24" width="24" height="24" aria-hidden="true" focusable="false" {
            path fill="currentColor" d=(path) {}
        }
    }
}

/// Empty slideshow dialog; the runtime fills in title, image and counter.
fn render_slideshow_shell() -> Markup {
    html! {
        div #slideshow .slideshow hidden role="dialog" aria-modal="true" aria-labelledby="slideshow-title" {
            div.slideshow-backdrop data-slideshow-backdrop {}
            div.slideshow-frame {
                header.slideshow-header {
                    h2 #slideshow-title {}
                    button.slideshow-close type="button" aria-label="Close" { "×" }
                }
                div.slideshow-stage {
                    img.slideshow-image alt="" hidden;
                    div.slideshow-spinner role="status" hidden {
                        span.sr-only { "Loading" }
                    }
                    div.slideshow-error role="alert" hidden { "Failed to load image" }
                }
                button.slideshow-prev type="button" aria-label="Previous image" { "‹" }
                button.slideshow-next type="button" aria-label="Next image" { "›" }
                p.slideshow-counter aria-live="polite" {}
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn fixture_manifest() -> Manifest {
        let tmp = setup_fixtures();
        let mut manifest = scan(tmp.path()).unwrap();
        manifest.galleries[0].images[0].dimensions = Some((40, 25));
        manifest
    }

    fn page(manifest: &Manifest) -> String {
        render_page(manifest, "./pkg/devfolio.js").unwrap().into_string()
    }

    #[test]
    fn page_has_all_sections() {
        let html = page(&fixture_manifest());
        assert!(html.starts_with("<!DOCTYPE html>"));
        for id in [
            r#"id="hero""#,
            r#"id="projects""#,
            r#"id="skills""#,
            r#"id="experience""#,
            r#"id="slideshow""#,
        ] {
            assert!(html.contains(id), "missing {id}");
        }
        assert!(html.contains("<title>Ada Example - Full Stack Developer</title>"));
    }

    #[test]
    fn carousel_renders_every_project_twice() {
        let html = page(&fixture_manifest());
        assert_eq!(html.matches(r#"class="project-card""#).count(), 4);
        assert!(html.contains(r#"data-card-index="3" data-project-id="movie-chief""#));
        assert!(html.contains(r#"data-card-index="2" data-project-id="gojo""#));
        // Duplicates are hidden from assistive tech.
        assert_eq!(html.matches(r#"aria-hidden="true" aria-label="Open"#).count(), 2);
    }

    #[test]
    fn cover_uses_template_and_dimensions() {
        let html = page(&fixture_manifest());
        assert!(html.contains(r#"src="projects/gojo/010-home.png""#));
        assert!(html.contains(r#"width="40" height="25""#));
        assert!(html.contains(r#"src="projects/movie-chief/home_page.png""#));
    }

    #[test]
    fn bio_is_rendered_markdown() {
        let html = page(&fixture_manifest());
        assert!(html.contains("<strong>web applications</strong>"));
    }

    #[test]
    fn hero_links_to_sections() {
        let html = page(&fixture_manifest());
        assert!(html.contains(r##"href="#projects""##));
        assert!(html.contains(r##"href="#experience""##));
    }

    #[test]
    fn skills_carry_accents() {
        let html = page(&fixture_manifest());
        assert!(html.contains(r#"data-accent="blue""#));
        assert!(html.contains(r#"data-accent="yellow""#));
        assert!(html.contains("PostgreSQL"));
    }

    #[test]
    fn timeline_alternates_and_starts_visible() {
        let html = page(&fixture_manifest());
        assert!(html.contains(r#"class="timeline-entry left is-visible" data-index="0""#));
        assert!(html.contains(r#"class="timeline-entry right is-visible" data-index="1""#));
    }

    #[test]
    fn timeline_hidden_when_not_start_visible() {
        let mut manifest = fixture_manifest();
        manifest.config.timeline.start_visible = false;
        let html = page(&manifest);
        assert!(html.contains(r#"class="timeline-entry left" data-index="0""#));
        assert!(!html.contains("is-visible"));
    }

    #[test]
    fn footer_links_and_labels() {
        let html = page(&fixture_manifest());
        assert!(html.contains("Let's Connect") || html.contains("Let&#39;s Connect"));
        assert!(html.contains(r#"href="https://github.com/example" target="_blank""#));
        assert!(html.contains(r#"href="mailto:ada@example.com""#));
        assert!(html.contains(r#"<span class="sr-only">GitHub</span>"#));
        assert!(html.contains("© Ada Example"));
    }

    #[test]
    fn slideshow_shell_has_controls() {
        let html = page(&fixture_manifest());
        assert!(html.contains("slideshow-backdrop"));
        assert!(html.contains(r#"aria-label="Previous image""#));
        assert!(html.contains(r#"aria-label="Next image""#));
        assert!(html.contains("Failed to load image"));
        assert!(html.contains("slideshow-counter"));
    }

    #[test]
    fn payload_embedded_and_readable() {
        let manifest = fixture_manifest();
        let html = page(&manifest);
        let start_tag = format!(r#"<script type="application/json" id="{PAYLOAD_ELEMENT_ID}">"#);
        let start = html.find(&start_tag).unwrap() + start_tag.len();
        let end = start + html[start..].find("</script>").unwrap();
        let payload = RuntimePayload::from_json(&html[start..end]).unwrap();

        assert_eq!(payload, build_payload(&manifest));
        assert_eq!(payload.projects, vec!["gojo", "movie-chief"]);
        let gojo = payload.gallery("gojo").unwrap();
        assert_eq!(gojo.images.len(), 3);
        assert_eq!(gojo.images[2].url, "projects/gojo/030-Detail%20View.png");
        assert_eq!(gojo.images[0].width, Some(40));
    }

    #[test]
    fn payload_carries_settings() {
        let mut manifest = fixture_manifest();
        manifest.config.slideshow.load_timeout_ms = 2500;
        let payload = build_payload(&manifest);
        assert_eq!(payload.slideshow.load_timeout_ms, 2500);
        assert_eq!(payload.carousel, manifest.config.carousel);
    }

    #[test]
    fn content_is_escaped() {
        let mut manifest = fixture_manifest();
        manifest.portfolio.projects[0].subtitle = "<script>alert(1)</script>".to_string();
        manifest.galleries[0].title = "</script><img>".to_string();
        let html = page(&manifest);
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn module_loader_imports_runtime() {
        let html = page(&fixture_manifest());
        assert!(html.contains(r#"import init from "./pkg/devfolio.js";"#));
        assert!(html.contains("init();"));
    }

    #[test]
    fn no_projects_renders_placeholder() {
        let mut manifest = fixture_manifest();
        manifest.portfolio.projects.clear();
        manifest.galleries.clear();
        let html = page(&manifest);
        assert!(html.contains("No projects yet."));
        assert!(!html.contains("data-carousel"));
    }

    #[test]
    fn generate_writes_index_with_fingerprint() {
        let manifest = fixture_manifest();
        let temp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let manifest_path = temp.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();
        fs::create_dir_all(out.path().join("pkg")).unwrap();
        fs::write(out.path().join("pkg/devfolio.js"), "export default function init() {}").unwrap();

        generate(&manifest_path, out.path()).unwrap();
        let html = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(html.contains(r#"import init from "./pkg/devfolio.js?v="#));
    }

    #[test]
    fn generate_without_runtime_still_writes_page() {
        let manifest = fixture_manifest();
        let temp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let manifest_path = temp.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

        let returned = generate(&manifest_path, out.path()).unwrap();
        assert_eq!(returned.galleries.len(), 2);
        let html = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(html.contains(r#"import init from "./pkg/devfolio.js";"#));
    }
}
