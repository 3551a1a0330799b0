use clap::Parser;
use recipe_scaler::app::{default_cases, export_report, render_demo, render_report, run_demo};
use recipe_scaler::utils::{logger, validation::Validate};
use recipe_scaler::{builtin_recipes, CliConfig, Evaluator, LocalStorage, ScalerError, TomlConfig};

fn fail(context: &str, e: &ScalerError) -> ! {
    tracing::error!("❌ {}: {} (Category: {:?})", context, e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🍛 Starting recipe scaling evaluation");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)
                .unwrap_or_else(|e| fail(&format!("Failed to load config file '{}'", path), &e));
            if let Err(e) = config.validate() {
                fail("Configuration validation failed", &e);
            }
            Some(config)
        }
        None => None,
    };

    let book = match &file {
        Some(config) => config
            .recipe_book()
            .unwrap_or_else(|e| fail("Failed to load recipes", &e)),
        None => builtin_recipes(),
    };

    let (settings, export) = cli.resolve(file.as_ref());
    if let Err(e) = settings.validate() {
        fail("Evaluation settings are invalid", &e);
    }

    let evaluator = Evaluator::new(&book);
    let report = evaluator
        .run(&settings)
        .unwrap_or_else(|e| fail("Evaluation failed", &e));

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&report));
    }

    if let Some(path) = &export.path {
        let storage = LocalStorage::new(path.clone());
        match export_report(&report, &storage, &export.formats) {
            Ok(files) => tracing::info!("📁 Report saved to {}: {}", path, files.join(", ")),
            Err(e) => fail("Failed to export report", &e),
        }
    }

    if !cli.no_demo && !cli.json {
        let results = run_demo(&book, evaluator.strategies(), &default_cases());
        println!();
        println!("{}", render_demo(&results));
    }

    tracing::info!("✅ Evaluation complete");
    Ok(())
}
