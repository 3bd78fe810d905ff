//! End-to-end runs of the `devfolio` binary over a small content tree.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PORTFOLIO: &str = r#"
[profile]
name = "Sam Sample"
role = "Backend Engineer"
photo = "me.png"
bio = "Builds *reliable* services."

[[links]]
kind = "github"
label = "GitHub"
url = "https://github.com/sample"

[[projects]]
id = "tracker"
name = "Tracker"
description = "overview"
subtitle = "Issue tracking"

[[projects]]
id = "ledger"
name = "Ledger"
description = "accounts"
subtitle = "Bookkeeping"

[[projects]]
id = "radar"
name = "Radar"
description = "map"
subtitle = "Fleet map"

[[skills]]
title = "Languages"
accent = "green"
items = ["Rust", "Go"]

[[experience]]
title = "Engineer"
company = "Sample Co"
period = "2020 - Present"
description = "Runs the platform team."
"#;

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 80, 40]))
        .save(path)
        .unwrap();
}

fn content_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join("portfolio.toml"), PORTFOLIO).unwrap();
    write_png(&root.join("me.png"), 10, 10);
    for (id, files) in [
        ("tracker", &["010-overview.png", "020-board.png"][..]),
        ("ledger", &["accounts.png"][..]),
        ("radar", &["010-map.png", "020-Live Feed.png", "030-alerts.png"][..]),
    ] {
        let dir = root.join("projects").join(id);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            write_png(&dir.join(file), 30, 20);
        }
    }
    tmp
}

fn run(args: &[&str], source: &Path, output: &Path, temp: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_devfolio"))
        .args(args)
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(output)
        .arg("--temp-dir")
        .arg(temp)
        .output()
        .expect("failed to run devfolio")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn build_produces_page_and_screenshots() {
    let content = content_tree();
    let work = TempDir::new().unwrap();
    let dist = work.path().join("dist");
    let temp = work.path().join("temp");

    let out = run(&["build"], content.path(), &dist, &temp);
    assert!(
        out.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let html = fs::read_to_string(dist.join("index.html")).unwrap();
    assert_eq!(html.matches(r#"class="project-card""#).count(), 6);
    assert!(html.contains(r#"src="projects/radar/010-map.png""#));
    assert!(html.contains("<em>reliable</em>"));
    assert!(dist.join("projects/radar/020-Live Feed.png").is_file());
    assert!(dist.join("projects/ledger/accounts.png").is_file());
    assert!(dist.join("me.png").is_file());
    assert!(temp.join("manifest.json").is_file());
    assert!(temp.join("processed/manifest.json").is_file());

    let log = stdout(&out);
    assert!(log.contains("==> Stage 1"));
    assert!(log.contains("001 Tracker (2 screenshots)"));
    assert!(log.contains("Screenshots: 7 copied"));
    assert!(log.contains("Generated 1 page: 3 projects, 6 screenshots"));
}

#[test]
fn second_build_reuses_published_copies() {
    let content = content_tree();
    let work = TempDir::new().unwrap();
    let dist = work.path().join("dist");
    let temp = work.path().join("temp");

    assert!(run(&["build"], content.path(), &dist, &temp).status.success());
    let again = run(&["build"], content.path(), &dist, &temp);
    assert!(again.status.success());
    assert!(stdout(&again).contains("Screenshots: 0 copied, 7 unchanged (7 total)"));

    let forced = run(&["build", "--no-cache"], content.path(), &dist, &temp);
    assert!(stdout(&forced).contains("Screenshots: 7 copied"));
}

#[test]
fn stages_run_separately() {
    let content = content_tree();
    let work = TempDir::new().unwrap();
    let dist = work.path().join("dist");
    let temp = work.path().join("temp");

    for stage in ["scan", "process", "generate"] {
        let out = run(&[stage], content.path(), &dist, &temp);
        assert!(
            out.status.success(),
            "{stage} failed: {}",
            String::from_utf8_lossy(&out.stderr)
        );
    }
    let html = fs::read_to_string(dist.join("index.html")).unwrap();
    // Dimensions come from the process stage.
    assert!(html.contains(r#"width="30" height="20""#));
}

#[test]
fn check_rejects_empty_gallery() {
    let content = content_tree();
    fs::remove_file(content.path().join("projects/ledger/accounts.png")).unwrap();
    let work = TempDir::new().unwrap();

    let out = run(
        &["check"],
        content.path(),
        &work.path().join("dist"),
        &work.path().join("temp"),
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("ledger"));
    assert!(!work.path().join("dist").exists());
}

#[test]
fn check_accepts_valid_content() {
    let content = content_tree();
    let work = TempDir::new().unwrap();
    let out = run(
        &["check"],
        content.path(),
        &work.path().join("dist"),
        &work.path().join("temp"),
    );
    assert!(out.status.success());
    assert!(stdout(&out).contains("==> Content is valid"));
}

#[test]
fn starter_files_are_valid() {
    let work = TempDir::new().unwrap();
    let content = work.path().join("content");
    fs::create_dir_all(&content).unwrap();

    let gen_config = run(&["gen-config"], &content, &work.path().join("d"), &work.path().join("t"));
    assert!(gen_config.status.success());
    fs::write(content.join("config.toml"), &gen_config.stdout).unwrap();
    let config = devfolio::config::load_config(&content).unwrap();
    let stock = devfolio::config::SiteConfig::default();
    assert_eq!(config.carousel, stock.carousel);
    assert_eq!(config.slideshow, stock.slideshow);
    assert_eq!(config.timeline, stock.timeline);
    assert_eq!(config.assets.image_path_template, stock.assets.image_path_template);

    let gen_content = run(&["gen-content"], &content, &work.path().join("d"), &work.path().join("t"));
    assert!(gen_content.status.success());
    let starter = stdout(&gen_content);
    assert!(starter.contains("[profile]"));
    assert!(starter.contains("[[projects]]"));
    fs::write(content.join("portfolio.toml"), starter).unwrap();
    devfolio::content::load_portfolio(&content).unwrap();
}
