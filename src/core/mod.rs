pub mod evaluator;
pub mod metrics;
pub mod strategies;

pub use crate::domain::model::{IngredientTable, KnownServings, Metrics, RecipeBook};
pub use crate::domain::ports::{ConfigProvider, ScalingStrategy, Storage};
pub use crate::utils::error::Result;
