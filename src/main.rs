#[cfg(not(target_arch = "wasm32"))]
use clap::{Parser, Subcommand};
#[cfg(not(target_arch = "wasm32"))]
use devfolio::{config, content, generate, output, process, scan};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// Shared flags for commands that publish screenshots.
#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the copy cache and republish every screenshot
    #[arg(long)]
    no_cache: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[command(name = "devfolio")]
#[command(about = "Static site generator for single-page developer portfolios")]
#[command(long_about = "\
Static site generator for single-page developer portfolios

One portfolio.toml describes the profile, links, projects, skills and
experience. Each project has a directory of screenshots that becomes its
slideshow; the project's `description` names the cover screenshot.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── portfolio.toml               # Profile, links, projects, skills, experience
  ├── profile.jpg                  # Profile photo
  └── projects/
      ├── gojo/                    # Directory name = project id
      │   ├── 010-home.png         # Ordered by numeric prefix
      │   └── 020-search-page.png
      └── movie-chief/
          ├── home_page.png        # Or listed explicitly: images = [...]
          └── details.png

The interactive widgets are a wasm module built separately with wasm-pack
(`wasm-pack build --target web --out-dir dist/pkg`). The page loads it from
`assets.runtime_script` and works as plain HTML until it is present.

Run 'devfolio gen-content' for a starter portfolio.toml and
'devfolio gen-config' for a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate manifests
    #[arg(long, default_value = ".devfolio-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Publish screenshots and read their dimensions
    Process(CacheArgs),
    /// Produce index.html from the processed manifest
    Generate,
    /// Run the full pipeline: scan → process → generate
    Build(CacheArgs),
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print a starter portfolio.toml
    GenContent,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_scan_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Process(cache_args) => {
            let scan_manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&scan_manifest_path)?;
            let input_manifest: serde_json::Value = serde_json::from_str(&manifest_content)?;
            let site_config: config::SiteConfig =
                serde_json::from_value(input_manifest.get("config").cloned().unwrap_or_default())?;
            init_thread_pool(&site_config.processing);
            run_process(&scan_manifest_path, &cli.source, &cli.output, &cli.temp_dir, &cache_args)?;
        }
        Command::Generate => {
            let processed_manifest_path = processed_manifest_path(&cli.temp_dir);
            let manifest = generate::generate(&processed_manifest_path, &cli.output)?;
            output::print_generate_output(&manifest);
        }
        Command::Build(cache_args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let scan_manifest_path = write_scan_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Publishing screenshots");
            init_thread_pool(&manifest.config.processing);
            let processed_manifest_path = run_process(
                &scan_manifest_path,
                &cli.source,
                &cli.output,
                &cli.temp_dir,
                &cache_args,
            )?;

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let manifest = generate::generate(&processed_manifest_path, &cli.output)?;
            output::print_generate_output(&manifest);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenContent => {
            print!("{}", content::starter_portfolio_toml());
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// `RUST_LOG` when set, warnings otherwise.
#[cfg(not(target_arch = "wasm32"))]
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

#[cfg(not(target_arch = "wasm32"))]
fn processed_manifest_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join("processed").join("manifest.json")
}

#[cfg(not(target_arch = "wasm32"))]
fn write_scan_manifest(
    manifest: &scan::Manifest,
    temp_dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

/// Run stage 2 with a printer thread draining progress events, then write
/// the processed manifest. Returns its path.
#[cfg(not(target_arch = "wasm32"))]
fn run_process(
    scan_manifest_path: &Path,
    source: &Path,
    output_dir: &Path,
    temp_dir: &Path,
    cache_args: &CacheArgs,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::process(
        scan_manifest_path,
        source,
        output_dir,
        !cache_args.no_cache,
        Some(tx),
    )?;
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    let processed_manifest_path = processed_manifest_path(temp_dir);
    if let Some(parent) = processed_manifest_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&result.manifest)?;
    std::fs::write(&processed_manifest_path, json)?;
    println!("Screenshots: {}", result.copy_stats);
    Ok(processed_manifest_path)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
#[cfg(not(target_arch = "wasm32"))]
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
