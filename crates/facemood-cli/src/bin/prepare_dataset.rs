use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use facemood_cli::init_tracing;
use facemood_processing::dataset::prepare_fer2013;

#[derive(Parser, Debug)]
#[command(name = "prepare_dataset")]
#[command(about = "Convert the FER-2013 CSV into train/val/test arrays (.npz)")]
struct Args {
    /// FER-2013 CSV with `emotion`, `pixels` and optional `Usage` columns
    #[arg(long, default_value = "fer2013.csv")]
    csv: PathBuf,

    /// Output archive
    #[arg(long, default_value = "fer2013_data.npz")]
    out: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if !args.csv.exists() {
        anyhow::bail!(
            "{} not found. Download fer2013.csv or pass --csv",
            args.csv.display()
        );
    }

    let splits = prepare_fer2013(&args.csv, &args.out)
        .with_context(|| format!("Failed to prepare {}", args.csv.display()))?;

    println!("Saved: {}", args.out.display());
    println!(
        "Train/Val/Test sizes: {} {} {}",
        splits.train.len(),
        splits.val.len(),
        splits.test.len()
    );

    Ok(())
}
