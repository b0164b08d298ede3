//! CLI tool to convert a crater shapefile to a craterstats .diam file.

use clap::Parser;
use shp2diam::{ConvertError, shapefile_to_diam};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Convert craters stored as polygons in a shapefile to a .diam file
/// readable by crater statistics tools.
///
/// Columns named (in any character case) diameter|diam|d, radius|rad|r,
/// latitude|lat or longitude|lon are included in the output table. Diameter
/// and radius are converted from metres to kilometres. The emitted
/// `area = 1` line is a placeholder: edit it to the area covered by the
/// crater distribution.
#[derive(Parser)]
#[command(name = "shp2diam")]
struct Cli {
    /// Path to the shapefile (.shp)
    shapefile: PathBuf,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show paths and record counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        eprintln!("Shapefile: {}", cli.shapefile.display());
        eprintln!(
            "Output:    {}",
            cli.output
                .as_deref()
                .map_or("(stdout)".to_string(), |p| p.display().to_string())
        );
    }

    match shapefile_to_diam(&cli.shapefile) {
        Ok((output, record_count, column_count)) => {
            if let Some(out_path) = &cli.output {
                if let Err(e) = fs::write(out_path, &output) {
                    eprintln!("Error writing output file '{}': {e}", out_path.display());
                    process::exit(1);
                }
            } else if let Err(e) = io::stdout().write_all(output.as_bytes()) {
                eprintln!("Error writing output: {e}");
                process::exit(1);
            }
            if cli.verbose {
                eprintln!("Records:  {record_count} records, {column_count} columns");
            }
        }
        Err(ConvertError::NoUsefulFields) => {
            eprintln!("No useful fields found. File not written.");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
