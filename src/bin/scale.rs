use anyhow::Context;
use clap::Parser;
use recipe_scaler::app::render_scaled;
use recipe_scaler::utils::{logger, validation::Validate};
use recipe_scaler::{builtin_recipes, KnownServings, StrategyKind, TomlConfig};

#[derive(Parser)]
#[command(name = "scale")]
#[command(about = "Scale one recipe to any serving size from two known serving sizes")]
struct Args {
    /// Recipe name, e.g. palak_paneer
    #[arg(short, long)]
    recipe: String,

    /// Known serving sizes, e.g. 2,4
    #[arg(short, long)]
    known: KnownServings,

    /// Serving size to scale to (fractions allowed)
    #[arg(short, long, allow_negative_numbers = true)]
    target: f64,

    #[arg(short, long, value_enum, default_value = "linear")]
    method: StrategyKind,

    /// TOML file providing the recipe table
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let book = match &args.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            config.validate().context("invalid configuration")?;
            config.recipe_book()?
        }
        None => builtin_recipes(),
    };

    if args.target < 0.0 {
        tracing::warn!(
            "Negative target {} servings: simple ratio scaling will report negative quantities",
            args.target
        );
    }

    let strategy = args.method.build();
    let scaled = strategy
        .scale(&book, &args.recipe, args.known, args.target)
        .with_context(|| format!("could not scale {} to {} servings", args.recipe, args.target))?;

    println!(
        "{}",
        render_scaled(&args.recipe, args.known, args.target, strategy.name(), &scaled)
    );
    Ok(())
}
