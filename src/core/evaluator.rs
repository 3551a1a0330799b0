use crate::core::metrics::calculate_metrics;
use crate::core::strategies::all_strategies;
use crate::domain::model::{IngredientTable, KnownServings, Metrics, RecipeBook};
use crate::domain::ports::{ConfigProvider, ScalingStrategy};
use crate::utils::error::{Result, ScalerError};
use crate::utils::validation::{validate_positive_number, Validate};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_TRIALS: usize = 20;
pub const DEFAULT_TARGET_SERVINGS: [u32; 2] = [2, 4];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSettings {
    /// Repetitions of the full sweep. Inputs are deterministic, so extra
    /// trials only add identical samples.
    pub trials: usize,
    pub known: KnownServings,
    /// Must be recorded serving sizes: they provide the ground truth.
    pub targets: Vec<u32>,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            known: KnownServings::default(),
            targets: DEFAULT_TARGET_SERVINGS.to_vec(),
        }
    }
}

impl EvaluationSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            trials: config.trials(),
            known: config.known_servings(),
            targets: config.target_servings().to_vec(),
        }
    }
}

impl Validate for EvaluationSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("evaluation.trials", self.trials, 1)?;
        validate_positive_number("evaluation.target_servings", self.targets.len(), 1)?;

        if self.known.is_degenerate() {
            tracing::warn!(
                "Known servings {} are equal; linear scaling will return the recorded quantities unchanged",
                self.known
            );
        }
        Ok(())
    }
}

/// Result of running one strategy for one recipe/target in one trial.
#[derive(Debug)]
pub enum SampleOutcome {
    Scored(Metrics),
    Failed(ScalerError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSummary {
    pub method: String,
    pub samples: usize,
    pub failures: usize,
    pub avg_mae: Option<f64>,
    pub avg_mape: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientComparison {
    pub ingredient: String,
    pub predicted: f64,
    pub actual: Option<f64>,
}

/// Predicted vs recorded quantities for one recipe/target/method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDetail {
    pub recipe: String,
    pub target: u32,
    pub method: String,
    pub ingredients: Vec<IngredientComparison>,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccuracyGrade {
    Excellent,
    Good,
    NeedsImprovement,
}

impl AccuracyGrade {
    pub fn from_mae(mae: f64) -> Self {
        if mae < 5.0 {
            AccuracyGrade::Excellent
        } else if mae < 10.0 {
            AccuracyGrade::Good
        } else {
            AccuracyGrade::NeedsImprovement
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AccuracyGrade::Excellent => "Excellent! Very accurate predictions",
            AccuracyGrade::Good => "Good! Reasonably accurate predictions",
            AccuracyGrade::NeedsImprovement => "Needs improvement. Consider other methods",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub generated_at: DateTime<Utc>,
    pub settings: EvaluationSettings,
    pub details: Vec<PredictionDetail>,
    pub summaries: Vec<MethodSummary>,
    pub best_method: Option<String>,
}

impl EvaluationReport {
    pub fn summary(&self, method: &str) -> Option<&MethodSummary> {
        self.summaries.iter().find(|s| s.method == method)
    }

    /// Grade of the best method's average MAE.
    pub fn grade(&self) -> Option<AccuracyGrade> {
        let best = self.best_method.as_deref()?;
        self.summary(best)?.avg_mae.map(AccuracyGrade::from_mae)
    }
}

#[derive(Debug, Default)]
struct MethodAccumulator {
    mae: Vec<f64>,
    mape: Vec<f64>,
    failures: usize,
}

impl MethodAccumulator {
    fn record(&mut self, outcome: &SampleOutcome) {
        match outcome {
            SampleOutcome::Scored(metrics) => {
                self.mae.push(metrics.mae);
                self.mape.push(metrics.mape);
            }
            SampleOutcome::Failed(_) => self.failures += 1,
        }
    }

    fn summarize(&self, method: &str) -> MethodSummary {
        let average = |values: &[f64]| {
            (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
        };
        MethodSummary {
            method: method.to_string(),
            samples: self.mae.len(),
            failures: self.failures,
            avg_mae: average(&self.mae),
            avg_mape: average(&self.mape),
        }
    }
}

/// Lowest average MAE wins; the earlier method wins a tie.
pub fn select_best_method(summaries: &[MethodSummary]) -> Option<&MethodSummary> {
    let mut best: Option<(&MethodSummary, f64)> = None;
    for summary in summaries {
        if let Some(mae) = summary.avg_mae {
            if best.map_or(true, |(_, best_mae)| mae < best_mae) {
                best = Some((summary, mae));
            }
        }
    }
    best.map(|(summary, _)| summary)
}

pub struct Evaluator<'a> {
    book: &'a RecipeBook,
    strategies: Vec<Box<dyn ScalingStrategy>>,
}

impl<'a> Evaluator<'a> {
    pub fn new(book: &'a RecipeBook) -> Self {
        Self::with_strategies(book, all_strategies())
    }

    pub fn with_strategies(book: &'a RecipeBook, strategies: Vec<Box<dyn ScalingStrategy>>) -> Self {
        Self { book, strategies }
    }

    pub fn strategies(&self) -> &[Box<dyn ScalingStrategy>] {
        &self.strategies
    }

    /// Scores one strategy against the recorded quantities at `target`.
    /// Missing ground truth counts as a failed sample.
    pub fn evaluate_sample(
        &self,
        strategy: &dyn ScalingStrategy,
        recipe: &str,
        known: KnownServings,
        target: u32,
    ) -> (SampleOutcome, Option<IngredientTable>) {
        let actual = match self.book.quantities(recipe, target) {
            Ok(actual) => actual,
            Err(e) => return (SampleOutcome::Failed(e), None),
        };

        match strategy.scale(self.book, recipe, known, f64::from(target)) {
            Ok(predicted) => {
                let metrics = calculate_metrics(&predicted, actual);
                (SampleOutcome::Scored(metrics), Some(predicted))
            }
            Err(e) => (SampleOutcome::Failed(e), None),
        }
    }

    pub fn run(&self, settings: &EvaluationSettings) -> Result<EvaluationReport> {
        if self.strategies.is_empty() {
            return Err(ScalerError::EvaluationError {
                message: "no scaling strategies registered".to_string(),
            });
        }

        tracing::info!(
            "Evaluating {} strategies over {} recipes, {} trials, known servings {}, targets {:?}",
            self.strategies.len(),
            self.book.len(),
            settings.trials,
            settings.known,
            settings.targets
        );

        let mut accumulators: Vec<MethodAccumulator> = self
            .strategies
            .iter()
            .map(|_| MethodAccumulator::default())
            .collect();
        let mut details = Vec::new();

        for trial in 0..settings.trials {
            for recipe in self.book.names() {
                for &target in &settings.targets {
                    for (strategy, acc) in self.strategies.iter().zip(accumulators.iter_mut()) {
                        let (outcome, predicted) =
                            self.evaluate_sample(strategy.as_ref(), recipe, settings.known, target);

                        if let SampleOutcome::Failed(e) = &outcome {
                            tracing::warn!(
                                "Skipping {} for {} at {} servings (trial {}): {}",
                                strategy.name(),
                                recipe,
                                target,
                                trial + 1,
                                e
                            );
                        }

                        if trial == 0 {
                            if let (SampleOutcome::Scored(metrics), Some(predicted)) =
                                (&outcome, predicted)
                            {
                                details.push(self.detail(
                                    recipe,
                                    target,
                                    strategy.name(),
                                    predicted,
                                    *metrics,
                                ));
                            }
                        }

                        acc.record(&outcome);
                    }
                }
            }
        }

        let summaries: Vec<MethodSummary> = self
            .strategies
            .iter()
            .zip(&accumulators)
            .map(|(strategy, acc)| acc.summarize(strategy.name()))
            .collect();

        for summary in &summaries {
            tracing::debug!(
                "{}: {} samples, {} failures",
                summary.method,
                summary.samples,
                summary.failures
            );
        }

        let best_method = select_best_method(&summaries).map(|s| s.method.clone());
        match &best_method {
            Some(best) => tracing::info!("Best method: {}", best),
            None => tracing::warn!("No strategy produced a scored sample"),
        }

        Ok(EvaluationReport {
            generated_at: Utc::now(),
            settings: settings.clone(),
            details,
            summaries,
            best_method,
        })
    }

    fn detail(
        &self,
        recipe: &str,
        target: u32,
        method: &str,
        predicted: IngredientTable,
        metrics: Metrics,
    ) -> PredictionDetail {
        let actual = self.book.quantities(recipe, target).ok();
        let ingredients = predicted
            .into_iter()
            .map(|(ingredient, predicted)| IngredientComparison {
                actual: actual.and_then(|table| table.get(&ingredient).copied()),
                ingredient,
                predicted,
            })
            .collect();

        PredictionDetail {
            recipe: recipe.to_string(),
            target,
            method: method.to_string(),
            ingredients,
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Recipe;

    fn summary(method: &str, avg_mae: Option<f64>) -> MethodSummary {
        MethodSummary {
            method: method.to_string(),
            samples: usize::from(avg_mae.is_some()),
            failures: 0,
            avg_mae,
            avg_mape: avg_mae,
        }
    }

    #[test]
    fn test_select_best_method_prefers_lowest_mae() {
        let summaries = vec![
            summary("a", Some(4.0)),
            summary("b", Some(1.5)),
            summary("c", None),
        ];
        assert_eq!(select_best_method(&summaries).unwrap().method, "b");
    }

    #[test]
    fn test_select_best_method_tie_keeps_first() {
        let summaries = vec![summary("a", Some(2.0)), summary("b", Some(2.0))];
        assert_eq!(select_best_method(&summaries).unwrap().method, "a");
    }

    #[test]
    fn test_select_best_method_without_samples() {
        let summaries = vec![summary("a", None), summary("b", None)];
        assert!(select_best_method(&summaries).is_none());
    }

    #[test]
    fn test_accuracy_grade_thresholds() {
        assert_eq!(AccuracyGrade::from_mae(0.0), AccuracyGrade::Excellent);
        assert_eq!(AccuracyGrade::from_mae(4.99), AccuracyGrade::Excellent);
        assert_eq!(AccuracyGrade::from_mae(5.0), AccuracyGrade::Good);
        assert_eq!(AccuracyGrade::from_mae(10.0), AccuracyGrade::NeedsImprovement);
    }

    #[test]
    fn test_settings_validation() {
        assert!(EvaluationSettings::default().validate().is_ok());

        let no_trials = EvaluationSettings {
            trials: 0,
            ..EvaluationSettings::default()
        };
        assert!(no_trials.validate().is_err());

        let no_targets = EvaluationSettings {
            targets: vec![],
            ..EvaluationSettings::default()
        };
        assert!(no_targets.validate().is_err());

        let degenerate = EvaluationSettings {
            known: KnownServings::new(2, 2),
            ..EvaluationSettings::default()
        };
        assert!(degenerate.validate().is_ok());
    }

    #[test]
    fn test_run_without_strategies_fails() {
        let book = RecipeBook::new();
        let evaluator = Evaluator::with_strategies(&book, Vec::new());
        let err = evaluator.run(&EvaluationSettings::default()).unwrap_err();
        assert!(matches!(err, ScalerError::EvaluationError { .. }));
    }

    #[test]
    fn test_missing_ground_truth_is_a_failed_sample() {
        let book = RecipeBook::new().with_recipe(
            Recipe::new("lassi")
                .with_serving(1, &[("Yogurt", 200.0)])
                .with_serving(2, &[("Yogurt", 400.0)])
                .with_serving(3, &[("Yogurt", 600.0)]),
        );
        let settings = EvaluationSettings {
            trials: 2,
            known: KnownServings::new(1, 3),
            targets: vec![2, 4],
        };

        let report = Evaluator::new(&book).run(&settings).unwrap();

        for summary in &report.summaries {
            assert_eq!(summary.samples, 2, "{}", summary.method);
            assert_eq!(summary.failures, 2, "{}", summary.method);
        }
        let linear = report.summary("Linear Scaling").unwrap();
        assert_eq!(linear.avg_mae, Some(0.0));
        assert_eq!(report.best_method.as_deref(), Some("Linear Scaling"));
        assert_eq!(report.grade(), Some(AccuracyGrade::Excellent));
        // Details come from the first trial only.
        assert_eq!(report.details.len(), 3);
    }
}
