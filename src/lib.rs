pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{builtin::builtin_recipes, cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::evaluator::{EvaluationReport, EvaluationSettings, Evaluator};
pub use crate::core::strategies::{
    all_strategies, LinearScaling, ProportionalScaling, SimpleRatioScaling, StrategyKind,
};
pub use crate::domain::model::{IngredientTable, KnownServings, Metrics, Recipe, RecipeBook};
pub use crate::domain::ports::ScalingStrategy;
pub use crate::utils::error::{Result, ScalerError};
