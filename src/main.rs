mod args;
mod utils;

use args::Args;
use tracing_subscriber::EnvFilter;
use zipres::manifest::Manifest;
use zipres::result::Result;
use zipres::{ArchiveBuilder, DirectoryNaming};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "zipres=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let Args {
        verbose,
        path,
        output,
        trailing_slash,
        source_date_epoch,
    } = Args::parse();

    init_tracing(verbose);

    let manifest_path = utils::find_manifest(path.as_deref())?;

    cliclack::intro("zipres")?;

    let mut manifest = {
        let spinner = cliclack::spinner();
        spinner.start("Loading manifest...");
        match Manifest::load(&manifest_path) {
            Ok(m) => {
                spinner.stop(format!("Loaded {} resources", m.resources.len()));
                m
            }
            Err(e) => {
                spinner.error("Failed to load manifest");
                return Err(e);
            }
        }
    };

    // Command-line settings override the manifest's [archive] table
    if trailing_slash {
        manifest.options.directory_names = DirectoryNaming::TrailingSlash;
    }
    if let Some(epoch) = source_date_epoch {
        manifest.options.source_date_epoch = Some(epoch);
    }

    if verbose {
        cliclack::log::info(format!(
            "Base directory: {}",
            manifest.base_dir.display()
        ))?;
    }

    let archive_path = {
        let spinner = cliclack::spinner();
        spinner.start("Creating zip archive...");
        let builder = ArchiveBuilder::new(manifest.options);
        match builder.build(&manifest.base_dir, &manifest.resources) {
            Ok(path) => {
                spinner.stop("Archive created");
                path
            }
            Err(e) => {
                spinner.error("Failed to create archive");
                return Err(e);
            }
        }
    };

    let archive_path = match output {
        Some(destination) => {
            utils::move_file(&archive_path, &destination)?;
            destination
        }
        None => archive_path,
    };

    cliclack::outro(format!("Archive written to {}", archive_path.display()))?;
    Ok(())
}
