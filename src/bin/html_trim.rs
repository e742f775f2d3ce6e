use catalog_report::utils::{html, logger};
use clap::Parser;
use std::path::Path;

#[derive(Parser)]
#[command(name = "html-trim")]
#[command(about = "Removes content left after the closing </html> tag")]
struct Args {
    /// HTML files to trim
    #[arg(required = true)]
    paths: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let mut total_saved: i64 = 0;
    let mut failed = false;

    for raw_path in &args.paths {
        match html::trim_document(Path::new(raw_path)) {
            Ok(outcome) => {
                total_saved += outcome.saved_bytes;
                let status = if outcome.changed {
                    "trimmed"
                } else {
                    "no change"
                };
                println!("{}: {} (saved {} bytes)", raw_path, status, outcome.saved_bytes);
            }
            Err(e) => {
                failed = true;
                tracing::error!("Failed to trim {}: {}", raw_path, e);
                eprintln!("❌ {}: {}", raw_path, e.user_friendly_message());
            }
        }
    }

    if total_saved != 0 {
        println!("Total saved: {} bytes", total_saved);
    }

    if failed {
        std::process::exit(1);
    }

    Ok(())
}
