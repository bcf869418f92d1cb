use anyhow::Context;
use clap::Parser;
use fotarh_check::utils::{logger, validation::Validate};
use fotarh_check::{CliConfig, ConfigProvider, Suite, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting fotarh-check");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let suite = match &config.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file {}", path))?;
            build_suite(&file_config)
        }
        None => build_suite(&config),
    };

    let suite = match suite {
        Ok(suite) => suite,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let report = suite.run().await;
    println!("{}", suite.name());
    println!("{}", report);

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}

fn build_suite<C: ConfigProvider + Validate>(config: &C) -> fotarh_check::Result<Suite> {
    config.validate()?;
    tracing::info!(
        "Targeting project '{}' at {} ({})",
        config.project_id(),
        config.emulator_host(),
        config.document()
    );
    Suite::standard(config)
}
