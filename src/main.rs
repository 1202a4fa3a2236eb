use anyhow::Context;
use clap::Parser;
use lpm_outliers::utils::error::ErrorSeverity;
use lpm_outliers::utils::{logger, validation::Validate};
use lpm_outliers::{generate_lpm_data, CliConfig, LocalStorage, TomlConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => TomlConfig::default(),
    };
    let config = cli.merge_into(file_config);

    logger::init_logger(config.log_format().unwrap_or_default(), config.verbose());

    tracing::info!("🚀 Starting lpm-outliers");
    if config.verbose() {
        tracing::debug!("CLI flags: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let request = config.to_request();
    let seed = config.seed();

    if cli.dry_run {
        display_plan(&config);
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_directory());

    match generate_lpm_data(storage, seed, request) {
        Ok(report) => {
            tracing::info!(
                "✅ Generated {} observations ({} boundaries)",
                report.rows_with_extremes,
                report.boundaries.len()
            );
            tracing::debug!("Run report: {}", serde_json::to_string(&report)?);
            for path in &report.written {
                println!("📁 Output saved to: {}", path.display());
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_plan(config: &TomlConfig) {
    let request = config.to_request();

    println!("📋 Planned run:");
    println!("  Seed: {}", config.seed());
    println!(
        "  Normal observations: {} ({} / {})",
        request.normal_count, request.label1, request.label2
    );
    println!("  Extreme observations: {}", request.extreme_count);
    println!("  Output directory: {}", config.output_directory());
    if request.save_data {
        println!("  Data file: {}", request.data_file);
    }
    if request.save_plot {
        println!("  Plot file: {}", request.plot_file);
    }
    if request.omit_degenerate_boundaries {
        println!("  Degenerate boundaries are omitted instead of failing the run");
    }
    println!();
    println!("🔍 DRY RUN: nothing was generated or written.");
}
