use crate::domain::model::{shared_ingredients, IngredientTable, KnownServings, RecipeBook};
use crate::domain::ports::ScalingStrategy;
use crate::utils::error::Result;

/// Per-ingredient linear interpolation/extrapolation through both anchors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScaling;

/// One averaged growth factor, normalized by the serving ratio and applied
/// to every ingredient of the first anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalScaling;

/// Multiplies the first anchor by `target / s1`. The second anchor is unused.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRatioScaling;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum StrategyKind {
    Linear,
    Proportional,
    SimpleRatio,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Linear,
        StrategyKind::Proportional,
        StrategyKind::SimpleRatio,
    ];

    pub fn build(self) -> Box<dyn ScalingStrategy> {
        match self {
            StrategyKind::Linear => Box::new(LinearScaling),
            StrategyKind::Proportional => Box::new(ProportionalScaling),
            StrategyKind::SimpleRatio => Box::new(SimpleRatioScaling),
        }
    }
}

/// Every strategy, in the order they are evaluated and reported.
pub fn all_strategies() -> Vec<Box<dyn ScalingStrategy>> {
    StrategyKind::ALL.iter().map(|kind| kind.build()).collect()
}

fn anchor_tables<'a>(
    book: &'a RecipeBook,
    recipe: &str,
    known: KnownServings,
) -> Result<(&'a IngredientTable, &'a IngredientTable)> {
    let recipe = book.recipe(recipe)?;
    Ok((recipe.serving(known.first)?, recipe.serving(known.second)?))
}

impl ScalingStrategy for LinearScaling {
    fn name(&self) -> &'static str {
        "Linear Scaling"
    }

    fn scale(
        &self,
        book: &RecipeBook,
        recipe: &str,
        known: KnownServings,
        target: f64,
    ) -> Result<IngredientTable> {
        let (at_s1, at_s2) = anchor_tables(book, recipe, known)?;
        let s1 = f64::from(known.first);
        let s2 = f64::from(known.second);

        if known.is_degenerate() {
            tracing::debug!(
                "Known servings {} are equal, {} falls back to identity",
                known,
                recipe
            );
        }

        let scaled = shared_ingredients(at_s1, at_s2)
            .map(|(ingredient, q1, q2)| {
                let quantity = if known.is_degenerate() {
                    q1
                } else {
                    q1 + (q2 - q1) * (target - s1) / (s2 - s1)
                };
                (ingredient.to_string(), quantity.max(0.0))
            })
            .collect();

        Ok(scaled)
    }
}

/// Average of `q2 / q1` over shared ingredients with `q1 > 0`, divided by
/// `s2 / s1`. Falls back to 1 when no ingredient qualifies or an anchor is 0.
pub fn base_scaling_rate(
    at_s1: &IngredientTable,
    at_s2: &IngredientTable,
    known: KnownServings,
) -> f64 {
    let factors: Vec<f64> = shared_ingredients(at_s1, at_s2)
        .filter(|(_, q1, _)| *q1 > 0.0)
        .map(|(_, q1, q2)| q2 / q1)
        .collect();

    if factors.is_empty() {
        tracing::debug!("No shared ingredient with a positive quantity, base rate is 1");
        return 1.0;
    }

    let avg_factor = factors.iter().sum::<f64>() / factors.len() as f64;
    let s1 = f64::from(known.first);
    let s2 = f64::from(known.second);
    let serving_ratio = if s1 > 0.0 { s2 / s1 } else { 1.0 };

    if serving_ratio > 0.0 {
        avg_factor / serving_ratio
    } else {
        1.0
    }
}

/// `target / s1`, or 1 when the first anchor is zero.
fn target_ratio(known: KnownServings, target: f64) -> f64 {
    if known.first > 0 {
        target / f64::from(known.first)
    } else {
        tracing::debug!("First known serving is 0, using an identity ratio");
        1.0
    }
}

impl ScalingStrategy for ProportionalScaling {
    fn name(&self) -> &'static str {
        "Proportional Scaling"
    }

    fn scale(
        &self,
        book: &RecipeBook,
        recipe: &str,
        known: KnownServings,
        target: f64,
    ) -> Result<IngredientTable> {
        let (at_s1, at_s2) = anchor_tables(book, recipe, known)?;
        let base_rate = base_scaling_rate(at_s1, at_s2, known);
        let ratio = target_ratio(known, target);

        let scaled = shared_ingredients(at_s1, at_s2)
            .map(|(ingredient, q1, _)| (ingredient.to_string(), (q1 * base_rate * ratio).max(0.0)))
            .collect();

        Ok(scaled)
    }
}

impl ScalingStrategy for SimpleRatioScaling {
    fn name(&self) -> &'static str {
        "Simple Ratio Scaling"
    }

    // No clamping: a negative target yields negative quantities.
    fn scale(
        &self,
        book: &RecipeBook,
        recipe: &str,
        known: KnownServings,
        target: f64,
    ) -> Result<IngredientTable> {
        let at_s1 = book.quantities(recipe, known.first)?;
        let ratio = target_ratio(known, target);

        Ok(at_s1
            .iter()
            .map(|(ingredient, quantity)| (ingredient.clone(), quantity * ratio))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Recipe;
    use crate::utils::error::ScalerError;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn book() -> RecipeBook {
        RecipeBook::new().with_recipe(
            Recipe::new("kheer")
                .with_serving(0, &[("Milk", 100.0)])
                .with_serving(1, &[("Milk", 500.0), ("Rice", 40.0), ("Sugar", 0.0)])
                .with_serving(2, &[("Milk", 900.0), ("Rice", 80.0), ("Sugar", 60.0)])
                .with_serving(3, &[("Milk", 1200.0), ("Cardamom", 1.0)]),
        )
    }

    #[test]
    fn test_linear_only_covers_shared_ingredients() {
        let result = LinearScaling
            .scale(&book(), "kheer", KnownServings::new(1, 3), 2.0)
            .unwrap();
        assert_eq!(result.len(), 1);
        assert!(approx(result["Milk"], 850.0));
    }

    #[test]
    fn test_linear_clamps_negative_extrapolation() {
        let book = RecipeBook::new().with_recipe(
            Recipe::new("raita")
                .with_serving(1, &[("Salt", 5.0)])
                .with_serving(2, &[("Salt", 1.0)]),
        );
        let result = LinearScaling
            .scale(&book, "raita", KnownServings::new(1, 2), 4.0)
            .unwrap();
        assert_eq!(result["Salt"], 0.0);
    }

    #[test]
    fn test_linear_degenerate_is_identity() {
        let result = LinearScaling
            .scale(&book(), "kheer", KnownServings::new(2, 2), 9.0)
            .unwrap();
        assert_eq!(result["Milk"], 900.0);
        assert_eq!(result["Sugar"], 60.0);
    }

    #[test]
    fn test_linear_missing_serving_fails() {
        let err = LinearScaling
            .scale(&book(), "kheer", KnownServings::new(1, 7), 2.0)
            .unwrap_err();
        assert!(matches!(err, ScalerError::MissingServing { serving: 7, .. }));
    }

    #[test]
    fn test_base_scaling_rate_skips_zero_quantities() {
        let book = book();
        let recipe = book.recipe("kheer").unwrap();
        let rate = base_scaling_rate(
            recipe.serving(1).unwrap(),
            recipe.serving(2).unwrap(),
            KnownServings::new(1, 2),
        );
        // Milk 1.8, Rice 2.0 (Sugar skipped), averaged then halved.
        assert!(approx(rate, 0.95));
    }

    #[test]
    fn test_base_scaling_rate_defaults_to_one_without_overlap() {
        let a: IngredientTable = [("Milk".to_string(), 1.0)].into_iter().collect();
        let b: IngredientTable = [("Rice".to_string(), 1.0)].into_iter().collect();
        assert_eq!(base_scaling_rate(&a, &b, KnownServings::new(1, 2)), 1.0);
    }

    #[test]
    fn test_proportional_applies_global_rate() {
        let result = ProportionalScaling
            .scale(&book(), "kheer", KnownServings::new(1, 2), 4.0)
            .unwrap();
        assert!(approx(result["Milk"], 500.0 * 0.95 * 4.0));
        assert!(approx(result["Rice"], 40.0 * 0.95 * 4.0));
        assert_eq!(result["Sugar"], 0.0);
    }

    #[test]
    fn test_zero_anchor_uses_identity_ratio() {
        let book = book();
        let known = KnownServings::new(0, 1);

        let simple = SimpleRatioScaling.scale(&book, "kheer", known, 5.0).unwrap();
        assert_eq!(simple["Milk"], 100.0);

        let proportional = ProportionalScaling.scale(&book, "kheer", known, 5.0).unwrap();
        // serving ratio falls back to 1, so the base rate is just 500 / 100.
        assert!(approx(proportional["Milk"], 500.0));
    }

    #[test]
    fn test_simple_ratio_ignores_second_anchor() {
        let result = SimpleRatioScaling
            .scale(&book(), "kheer", KnownServings::new(1, 42), 3.0)
            .unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result["Milk"], 1500.0);
        assert_eq!(result["Rice"], 120.0);
    }

    #[test]
    fn test_simple_ratio_negative_target_is_not_clamped() {
        let result = SimpleRatioScaling
            .scale(&book(), "kheer", KnownServings::new(1, 2), -1.0)
            .unwrap();
        assert_eq!(result["Milk"], -500.0);
    }

    #[test]
    fn test_all_strategies_order() {
        let names: Vec<_> = all_strategies().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["Linear Scaling", "Proportional Scaling", "Simple Ratio Scaling"]
        );
    }
}
