//! Error metrics used to rank scaling strategies.
//!
//! Both metrics only look at ingredients present in both tables; anything
//! missing on either side is skipped rather than counted as zero.

use crate::domain::model::{shared_ingredients, IngredientTable, Metrics};

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Average `|predicted - actual|` in grams, 0 without overlap.
pub fn mean_absolute_error(predicted: &IngredientTable, actual: &IngredientTable) -> f64 {
    let errors: Vec<f64> = shared_ingredients(predicted, actual)
        .map(|(_, p, a)| (p - a).abs())
        .collect();
    mean(&errors)
}

/// Average `|predicted - actual| / actual * 100` over ingredients whose
/// actual quantity is positive, 0 when none qualify.
pub fn mean_absolute_percentage_error(predicted: &IngredientTable, actual: &IngredientTable) -> f64 {
    let errors: Vec<f64> = shared_ingredients(predicted, actual)
        .filter(|(_, _, a)| *a > 0.0)
        .map(|(_, p, a)| (p - a).abs() / a * 100.0)
        .collect();
    mean(&errors)
}

pub fn calculate_metrics(predicted: &IngredientTable, actual: &IngredientTable) -> Metrics {
    Metrics {
        mae: mean_absolute_error(predicted, actual),
        mape: mean_absolute_percentage_error(predicted, actual),
    }
}
