//! # CardKit CLI
//!
//! Headless front end for the export pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Render a template to a single image at its declared size
//! cardkit render template.json card.png
//!
//! # Bind every CSV row and write numbered card images
//! cardkit batch template.json --data-dir ./data --out ./cards
//!
//! # Assemble all bound cards into a printable PDF
//! cardkit pdf template.json deck.pdf --page-size a4 --start-row 1 --end-row 50
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use cardkit::{
    export_batch, export_pdf, init_logging, resolve_data_source, settings, write_image, Config,
    ImageFormat, PageSize, RowFilter, Template,
};

/// CardKit - board-game component generator
#[derive(Parser, Debug)]
#[command(name = "cardkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template to a single image
    Render {
        /// Template JSON file
        template: PathBuf,

        /// Output image path (.png or .jpg)
        output: PathBuf,
    },

    /// Export one image per dataset row
    Batch {
        /// Template JSON file
        template: PathBuf,

        /// Directory containing the template's CSV file
        /// (defaults to the configured data directory)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output directory for numbered card images
        #[arg(long, default_value = "out")]
        out: PathBuf,

        /// First row to export (1-based)
        #[arg(long)]
        start_row: Option<usize>,

        /// Last row to export (inclusive)
        #[arg(long)]
        end_row: Option<usize>,
    },

    /// Assemble dataset rows into a printable PDF
    Pdf {
        /// Template JSON file
        template: PathBuf,

        /// Output PDF path
        output: PathBuf,

        /// Directory containing the template's CSV file
        /// (defaults to the configured data directory)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Page size: a3, a4, a5, letter, legal
        /// (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<String>,

        /// First row to export (1-based)
        #[arg(long)]
        start_row: Option<usize>,

        /// Last row to export (inclusive)
        #[arg(long)]
        end_row: Option<usize>,
    },
}

fn row_filters(start_row: Option<usize>, end_row: Option<usize>) -> Vec<RowFilter> {
    match (start_row, end_row) {
        (None, None) => Vec::new(),
        (start, end) => vec![RowFilter::Range {
            start: start.unwrap_or(1),
            end,
        }],
    }
}

fn load_config() -> Config {
    match settings::config_file_path().and_then(settings::load_or_default) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Using default configuration: {}", err);
            Config::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let config = load_config();

    match cli.command {
        Commands::Render { template, output } => {
            let template = Template::load(&template)
                .with_context(|| format!("loading template {}", template.display()))?;
            let format = ImageFormat::from_path(&output);
            write_image(&template.document, &output, format)?;
            println!("Wrote {}", output.display());
        }

        Commands::Batch {
            template,
            data_dir,
            out,
            start_row,
            end_row,
        } => {
            let template = Template::load(&template)
                .with_context(|| format!("loading template {}", template.display()))?;
            let data_dir = data_dir.unwrap_or_else(|| config.workspace.data_dir.clone());
            let table = resolve_data_source(&template, &data_dir)?;
            let filters = row_filters(start_row, end_row);

            let summary = export_batch(&template, &table, &filters, &out, |current, total| {
                println!("Processing card {} of {}", current, total);
            })?;
            println!(
                "Exported {}/{} cards to {} ({} failed)",
                summary.exported,
                summary.attempted,
                out.display(),
                summary.failed
            );
        }

        Commands::Pdf {
            template,
            output,
            data_dir,
            page_size,
            start_row,
            end_row,
        } => {
            let template = Template::load(&template)
                .with_context(|| format!("loading template {}", template.display()))?;
            let data_dir = data_dir.unwrap_or_else(|| config.workspace.data_dir.clone());
            let table = resolve_data_source(&template, &data_dir)?;
            let page: PageSize = match page_size {
                Some(name) => name.parse().map_err(|e: String| anyhow::anyhow!(e))?,
                None => config.export.page_size,
            };
            let filters = row_filters(start_row, end_row);

            let summary = export_pdf(&template, &table, &filters, page, &output, |current, total| {
                println!("Processing card {} of {}", current, total);
            })?;
            println!(
                "Wrote {} ({}/{} cards, {} failed)",
                output.display(),
                summary.exported,
                summary.attempted,
                summary.failed
            );
        }
    }

    Ok(())
}
