use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;
use wall_gal::app::Gallery;
use wall_gal::fetch::Fetcher;
use wall_gal::{config, manifest, output, resolve, site};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "wall-gal")]
#[command(about = "Static image gallery with tiered image discovery")]
#[command(long_about = "\
Static image gallery with tiered image discovery

The gallery finds its images by trying three sources in order and keeping the
first one that answers:

  1. Manifest           images.json next to the page, a JSON array of names
  2. Hosting tree       the repository tree from the hosting provider's API,
                        when the page is served from a matching domain
  3. Directory listing  image links scraped from the page directory's index

Site structure:

  site/
  ├── config.toml                  # Optional, overrides stock defaults
  ├── images.json                  # Optional manifest ('wall-gal manifest')
  └── walls-catppuccin-mocha/      # Image folder, flat
      ├── forest.jpg
      └── sunset.png

Run 'wall-gal gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root holding config.toml and the image folder
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the discovery chain and print what it found
    Resolve {
        /// URL the gallery page is served from (defaults to the root as file://)
        #[arg(long)]
        page_url: Option<String>,
    },
    /// Write the manifest from the image folder
    Manifest,
    /// Resolve, apply a search query and write the static gallery
    Build {
        /// URL the gallery page is served from (defaults to the root as file://)
        #[arg(long)]
        page_url: Option<String>,
        /// Initial search query
        #[arg(long)]
        query: Option<String>,
        /// Output directory (defaults to the site root)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve { page_url } => {
            let config = config::load_config(&cli.root)?;
            let page_url = page_url_or_root(page_url.as_deref(), &cli.root)?;
            let fetcher = Fetcher::new(&config.hosting.user_agent)?;
            let resolution = resolve::resolve(&fetcher, &page_url, &config).await;
            output::print_resolution(&resolution, &config);
        }
        Command::Manifest => {
            let config = config::load_config(&cli.root)?;
            let images = manifest::scan_images(&cli.root.join(&config.images_dir), &config.extensions)?;
            let manifest_path = cli.root.join(&config.manifest_path);
            manifest::write_manifest(&manifest_path, &images)?;
            output::print_manifest_output(&manifest_path, &images, &config);
        }
        Command::Build {
            page_url,
            query,
            output,
        } => {
            let output_dir = output.unwrap_or_else(|| cli.root.clone());
            let mut config = config::load_config(&cli.root)?;
            let page_url = page_url_or_root(page_url.as_deref(), &cli.root)?;

            println!("==> Resolving images from {}", page_url);
            let fetcher = Fetcher::new(&config.hosting.user_agent)?;
            let resolution = resolve::resolve(&fetcher, &page_url, &config).await;
            output::print_resolution(&resolution, &config);

            config.images_dir = site::images_dir_from(&cli.root, &output_dir, &config.images_dir)?;
            let mut gallery = Gallery::new(config, resolution);
            if let Some(query) = query {
                gallery.search(&query);
            }

            println!("==> Generating HTML → {}", output_dir.display());
            site::build(&gallery, &output_dir)?;
            output::print_build_output(gallery.working(), gallery.config());

            println!("==> Build complete: {}", output_dir.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays the command output. `RUST_LOG`
/// overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

/// The explicit `--page-url`, or the site root as a `file://` directory URL.
fn page_url_or_root(
    page_url: Option<&str>,
    root: &Path,
) -> Result<Url, Box<dyn std::error::Error>> {
    if let Some(raw) = page_url {
        return Ok(Url::parse(raw)?);
    }
    let root = std::fs::canonicalize(root)?;
    Url::from_directory_path(&root)
        .map_err(|_| format!("cannot express {} as a file URL", root.display()).into())
}
