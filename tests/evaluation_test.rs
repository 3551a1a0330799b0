use recipe_scaler::app::render_report;
use recipe_scaler::core::evaluator::select_best_method;
use recipe_scaler::{
    builtin_recipes, EvaluationSettings, Evaluator, KnownServings, Recipe, RecipeBook,
};

#[test]
fn test_full_evaluation_on_builtin_table() {
    let book = builtin_recipes();
    let settings = EvaluationSettings::default();

    let report = Evaluator::new(&book).run(&settings).unwrap();

    assert_eq!(report.summaries.len(), 3);
    let expected_samples = settings.trials * book.len() * settings.targets.len();
    for summary in &report.summaries {
        assert_eq!(summary.samples, expected_samples, "{}", summary.method);
        assert_eq!(summary.failures, 0, "{}", summary.method);
        assert!(summary.avg_mae.unwrap() >= 0.0);
        assert!(summary.avg_mape.unwrap() >= 0.0);
    }

    let best = report.best_method.as_deref().unwrap();
    assert_eq!(select_best_method(&report.summaries).unwrap().method, best);
    let best_mae = report.summary(best).unwrap().avg_mae.unwrap();
    assert!(report
        .summaries
        .iter()
        .all(|s| s.avg_mae.unwrap() >= best_mae));
    assert!(report.grade().is_some());

    // One detail per recipe, target and strategy from the first trial.
    assert_eq!(report.details.len(), book.len() * settings.targets.len() * 3);
}

#[test]
fn test_trials_repeat_identical_samples() {
    let book = builtin_recipes();
    let once = Evaluator::new(&book)
        .run(&EvaluationSettings {
            trials: 1,
            ..EvaluationSettings::default()
        })
        .unwrap();
    let twenty = Evaluator::new(&book).run(&EvaluationSettings::default()).unwrap();

    for (a, b) in once.summaries.iter().zip(&twenty.summaries) {
        assert_eq!(a.method, b.method);
        assert!((a.avg_mae.unwrap() - b.avg_mae.unwrap()).abs() < 1e-9);
        assert!((a.avg_mape.unwrap() - b.avg_mape.unwrap()).abs() < 1e-9);
    }
    assert_eq!(once.best_method, twenty.best_method);
}

#[test]
fn test_evaluation_survives_strategy_failures() {
    // "sparse" lacks serving 3, so every anchor lookup fails for it.
    let book = builtin_recipes().with_recipe(
        Recipe::new("sparse")
            .with_serving(1, &[("Paneer", 100.0)])
            .with_serving(2, &[("Paneer", 200.0)])
            .with_serving(4, &[("Paneer", 400.0)]),
    );
    let settings = EvaluationSettings {
        trials: 2,
        ..EvaluationSettings::default()
    };

    let report = Evaluator::new(&book).run(&settings).unwrap();

    let linear = report.summary("Linear Scaling").unwrap();
    assert_eq!(linear.failures, 2 * 2);
    assert_eq!(linear.samples, 2 * 2 * 4);

    // Simple ratio only needs the first anchor.
    let simple = report.summary("Simple Ratio Scaling").unwrap();
    assert_eq!(simple.failures, 0);
    assert_eq!(simple.samples, 2 * 2 * 5);

    assert!(report.best_method.is_some());
}

#[test]
fn test_evaluation_with_no_scoreable_samples() {
    let book = RecipeBook::new().with_recipe(Recipe::new("empty").with_serving(1, &[]));
    let report = Evaluator::new(&book)
        .run(&EvaluationSettings::default())
        .unwrap();

    assert!(report.summaries.iter().all(|s| s.samples == 0 && s.avg_mae.is_none()));
    assert!(report.best_method.is_none());
    assert!(report.grade().is_none());
    assert!(render_report(&report).contains("BEST METHOD: none"));
}

#[test]
fn test_degenerate_known_servings_still_evaluates() {
    let book = builtin_recipes();
    let settings = EvaluationSettings {
        trials: 1,
        known: KnownServings::new(2, 2),
        targets: vec![1, 3],
    };

    let report = Evaluator::new(&book).run(&settings).unwrap();
    assert!(report.summaries.iter().all(|s| s.failures == 0));
    assert!(report.best_method.is_some());
}
