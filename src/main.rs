use clap::error::ErrorKind;
use clap::Parser;
use volby_etl::config::parse_error_message;
use volby_etl::utils::{logger, validation::Validate};
use volby_etl::{CliConfig, ElectionPipeline, EtlEngine, EtlError, HttpFetcher, LocalStorage};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let err = EtlError::invalid_argument(parse_error_message(&e));
            fail(&err);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    if let Err(e) = run(config).await {
        fail(&e);
    }
}

async fn run(config: CliConfig) -> volby_etl::Result<()> {
    let config = config.resolve_settings()?;
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證參數，在任何網路請求之前
    config.validate()?;

    println!("Downloading data from: {}", config.source_url);
    println!("Saving to file: {}", config.output_path);

    let fetcher = HttpFetcher::new(&config.settings)?;
    let storage = LocalStorage::new(".");
    let pipeline = ElectionPipeline::new(fetcher, storage, config);

    let output_path = EtlEngine::new(pipeline).run().await?;

    tracing::info!("✅ ETL process completed successfully!");
    println!("✅ Results saved to: {}", output_path);
    println!("Closing volby-etl");
    Ok(())
}

fn fail(e: &EtlError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
