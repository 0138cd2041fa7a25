use clap::Parser;
use gallery_build::imaging::RustBackend;
use gallery_build::pipeline::{self, BuildOptions};
use gallery_build::{config, output};
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("GALLERY_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GALLERY_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "gallery-build")]
#[command(about = "Convert HEICs to JPEG and regenerate gallery.html")]
#[command(long_about = "\
Convert HEICs to JPEG and regenerate gallery.html

Run from the repository root. Steps:

  1. IMG_*.heic files in docs/images are converted to JPEG (quality 92)
     and the originals removed.
  2. Gallery images (jpeg/jpg/png, except logo.png) wider than 2000px are
     downsampled in place, keeping the aspect ratio.
  3. docs/gallery.html is regenerated listing every gallery image.

Defaults can be overridden in an optional gallery.toml at the root.
HEIC support requires building with --features heic.")]
#[command(version = version_string())]
struct Cli {
    /// Skip HEIC to JPEG conversion (e.g. when libheif is unavailable or there are no HEICs)
    #[arg(long)]
    skip_convert: bool,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::current_dir()?;
    let config = config::load_config(&root)?;
    let options = BuildOptions {
        skip_convert: cli.skip_convert,
    };

    let summary = pipeline::build(&root, &config, options, &RustBackend::new())?;
    output::print_build_summary(&summary, config.downsample.max_width);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
