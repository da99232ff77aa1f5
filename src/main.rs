use clap::Parser;
use services_export::core::ConfigProvider;
use services_export::utils::{logger, validation::Validate};
use services_export::{
    CliConfig, ExportEngine, ExportSummary, LocalSink, PgServiceSource, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting services-export");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)?;
            validate_or_exit(&config);
            run(config).await
        }
        None => {
            validate_or_exit(&cli);
            run(cli).await
        }
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                pages = summary.pages,
                rows = summary.rows_scanned,
                rejected = summary.rows_rejected,
                organizations = summary.organizations,
                "export completed"
            );
            println!(
                "✅ Export completed: {} organizations from {} rows in {} ms",
                summary.organizations,
                summary.rows_scanned,
                summary.duration().num_milliseconds()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("export failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn validate_or_exit(config: &impl Validate) {
    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run<C: ConfigProvider>(config: C) -> services_export::Result<ExportSummary> {
    let source = PgServiceSource::connect(config.database_url()).await?;
    let sink = LocalSink::new(config.output_path().to_string());

    let engine = ExportEngine::new(source, sink, config);
    engine.run().await
}
