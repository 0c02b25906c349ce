use clap::Parser;
use pharmaguard_audit::core::batch::{discover_images, render_entry, run_batch};
use pharmaguard_audit::core::ModelClient;
use pharmaguard_audit::utils::logger::{self, LogFormat};
use pharmaguard_audit::{Auditor, GeminiClient, ModelArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "batch-audit")]
#[command(about = "Audit every indicator photo in a directory, one after another")]
struct Args {
    /// Directory holding .jpg/.jpeg/.png/.webp photos
    #[arg(default_value = "images")]
    dir: PathBuf,

    #[command(flatten)]
    model: ModelArgs,

    /// Print one JSON report instead of the human-readable summary
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    logger::init_logger(args.log_format, args.verbose);

    let auditor = match args
        .model
        .resolve()
        .and_then(|config| GeminiClient::new(&config))
    {
        Ok(client) => Auditor::new(client),
        Err(e) => {
            println!("❌ Failed to initialize auditor: {}", e);
            println!("💡 {}", e.recovery_suggestion());
            return Ok(());
        }
    };
    if !args.json {
        println!(
            "✅ PharmaGuard auditor initialized ({}).",
            auditor.client().model_name()
        );
    }

    let images = discover_images(&args.dir)?;
    if images.is_empty() {
        println!("⚠️ No images found in {}", args.dir.display());
        return Ok(());
    }

    if !args.json {
        println!("🔍 Found {} images to audit.", images.len());
    }

    let report = run_batch(&auditor, &images).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entry in &report.entries {
        println!();
        print!("{}", render_entry(entry));
    }
    println!();
    println!(
        "📊 {} audited: {} completed, {} failed",
        report.summary.total, report.summary.completed, report.summary.failed
    );

    Ok(())
}
