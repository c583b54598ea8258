use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use facemood_cli::{init_tracing, truncate_string};
use facemood_core::UploadRecord;
use facemood_db::UploadRepository;

#[derive(Parser, Debug)]
#[command(name = "list_uploads")]
#[command(about = "List recorded uploads, newest first")]
struct Args {
    /// SQLite database written by the server
    #[arg(long, default_value = "database.db")]
    database: PathBuf,

    /// Limit number of results (default: 50)
    #[arg(long, default_value = "50")]
    limit: i64,

    /// Output format: json or table (default: table)
    #[arg(long, default_value = "table")]
    format: String,
}

#[derive(serde::Serialize)]
struct UploadList {
    items: Vec<UploadRecord>,
    total_count: i64,
    limit: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if !args.database.exists() {
        anyhow::bail!("Database {} does not exist", args.database.display());
    }

    let repo = UploadRepository::new(&args.database);
    let items = repo
        .list(args.limit)
        .await
        .context("Failed to list uploads")?;
    let total_count = repo.count().await.context("Failed to count uploads")?;

    let list = UploadList {
        items,
        total_count,
        limit: args.limit,
    };

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        _ => {
            print_upload_table(&list);
        }
    }

    Ok(())
}

fn print_upload_table(list: &UploadList) {
    println!("\n=== Uploads ===\n");
    println!(
        "Total: {} uploads (showing {})",
        list.total_count,
        list.items.len()
    );

    if list.items.is_empty() {
        println!("\nNo uploads found.");
        return;
    }

    println!("\n{:>6} {:<40} {:<20}", "ID", "Filename", "Uploaded At");
    println!("{}", "-".repeat(68));

    for item in &list.items {
        println!(
            "{:>6} {:<40} {:<20}",
            item.id,
            truncate_string(&item.filename, 40),
            item.formatted_timestamp()
        );
    }

    if (list.items.len() as i64) < list.total_count {
        println!("\n... (more uploads available, raise --limit to see more)");
    }

    println!();
}
