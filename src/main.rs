use clap::Parser;
use pharmaguard_audit::config::cli::exit_code;
use pharmaguard_audit::utils::logger;
use pharmaguard_audit::{AuditResponse, Auditor, CliConfig, ErrorCode, GeminiClient};

#[tokio::main]
async fn main() {
    // pick up GOOGLE_API_KEY from .env when present
    let _ = dotenvy::dotenv();

    let config = CliConfig::parse();
    logger::init_logger(config.log_format, config.verbose);
    tracing::debug!(
        "Image: {}, model override: {:?}",
        config.image_path.display(),
        config.model.model
    );

    let response = match run(&config).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("❌ Audit could not run: {:#}", e);
            AuditResponse::failed(ErrorCode::CliExecutionFailed, e.to_string())
        }
    };

    // the only line written to stdout
    println!("{}", response.to_json());

    std::process::exit(exit_code(&response, config.strict_exit));
}

async fn run(config: &CliConfig) -> anyhow::Result<AuditResponse> {
    let audit_config = config.model.resolve()?;
    let client = GeminiClient::new(&audit_config)?;
    let auditor = Auditor::new(client);

    Ok(auditor.audit_image(&config.image_path).await)
}
