use clap::Parser;
use pharmaguard_audit::core::ModelClient;
use pharmaguard_audit::utils::logger::{self, LogFormat};
use pharmaguard_audit::{GeminiClient, ModelArgs};

const PING_PROMPT: &str = "Hello, can you hear me?";

#[derive(Parser)]
#[command(name = "check-model")]
#[command(about = "Check that the API key and model quota work")]
struct Args {
    #[command(flatten)]
    model: ModelArgs,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    logger::init_logger(args.log_format, args.verbose);

    let result = match args.model.resolve().and_then(|c| GeminiClient::new(&c)) {
        Ok(client) => client.ping(PING_PROMPT).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(text) => println!("✅ Success! Response: {}", text.trim()),
        Err(e) => {
            println!("❌ Failed: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
