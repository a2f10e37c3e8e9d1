use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;
use work_order_pdf::sample::{sample_work_order, sample_workshop};
use work_order_pdf::{Artifact, ReportComposer, WorkOrder, WorkshopInfo};

/// Renders work-order PDF reports from the command line.
///
/// Fonts are looked up under `WORK_ORDER_FONTS_DIR`, then `assets/fonts`, then
/// the installed system families.  Set `RUST_LOG=debug` for progress output.
#[derive(Parser)]
#[command(author, version, about = "Render work-order PDF reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a work order read from JSON files.
    Render(RenderArgs),

    /// Render the built-in demo order.
    Sample {
        /// Directory the report is written into.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// JSON file holding the work order.
    #[arg(long)]
    order: PathBuf,

    /// JSON file holding the workshop identity.
    #[arg(long)]
    workshop: PathBuf,

    /// PNG or JPEG logo printed above the title.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Directory the report is written into under a timestamped name.
    #[arg(long, default_value = ".", conflicts_with = "output")]
    out_dir: PathBuf,

    /// Exact destination file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => render(args).await,
        Commands::Sample { out_dir } => sample(out_dir).await,
    };

    match result {
        Ok(artifact) => println!(
            "Generated {} ({} bytes, {} page(s))",
            artifact.path.display(),
            artifact.bytes_written,
            artifact.page_count
        ),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(err.as_ref());
            std::process::exit(1);
        }
    }
}

async fn render(args: RenderArgs) -> Result<Artifact, Box<dyn Error>> {
    let order: WorkOrder = read_json(&args.order)?;
    let mut workshop: WorkshopInfo = read_json(&args.workshop)?;
    if let Some(logo) = &args.logo {
        let bytes = fs::read(logo)
            .map_err(|err| format!("failed to read logo {}: {}", logo.display(), err))?;
        workshop = workshop.with_logo(bytes);
    }

    let composer = ReportComposer::new().with_output_dir(args.out_dir);
    let artifact = match args.output {
        Some(path) => {
            tokio::task::spawn_blocking(move || composer.compose_to_path(&order, &workshop, path))
                .await??
        }
        None => composer.compose_async(order, workshop).await?,
    };
    Ok(artifact)
}

async fn sample(out_dir: PathBuf) -> Result<Artifact, Box<dyn Error>> {
    let order = sample_work_order(chrono::Local::now().date_naive());
    info!("Rendering demo order {}", order.number);
    let artifact = ReportComposer::new()
        .with_output_dir(out_dir)
        .compose_async(order, sample_workshop())
        .await?;
    Ok(artifact)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    let value = serde_json::from_str(&text)
        .map_err(|err| format!("failed to parse {}: {}", path.display(), err))?;
    Ok(value)
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
