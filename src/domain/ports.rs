use crate::domain::model::{IngredientTable, KnownServings, RecipeBook, ReportFormat};
use crate::utils::error::Result;

/// A deterministic way of predicting a recipe's ingredient quantities at
/// `target` servings from the quantities recorded at two known servings.
pub trait ScalingStrategy {
    fn name(&self) -> &'static str;

    fn scale(
        &self,
        book: &RecipeBook,
        recipe: &str,
        known: KnownServings,
        target: f64,
    ) -> Result<IngredientTable>;
}

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn trials(&self) -> usize;
    fn known_servings(&self) -> KnownServings;
    fn target_servings(&self) -> &[u32];
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> &[ReportFormat];
}
