use crate::domain::model::{IngredientTable, KnownServings, RecipeBook};
use crate::domain::ports::ScalingStrategy;
use crate::utils::error::Result;

/// Ingredients listed per strategy in the demo output.
const DEMO_INGREDIENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DemoCase {
    pub recipe: String,
    pub known: KnownServings,
    pub target: f64,
}

impl DemoCase {
    pub fn new(recipe: impl Into<String>, known: KnownServings, target: f64) -> Self {
        Self {
            recipe: recipe.into(),
            known,
            target,
        }
    }
}

#[derive(Debug)]
pub struct DemoResult {
    pub case: DemoCase,
    pub method: &'static str,
    pub outcome: Result<IngredientTable>,
}

pub fn default_cases() -> Vec<DemoCase> {
    vec![
        DemoCase::new("palak_paneer", KnownServings::new(2, 4), 6.0),
        DemoCase::new("shahi_paneer", KnownServings::new(1, 3), 1.5),
    ]
}

pub fn run_demo(
    book: &RecipeBook,
    strategies: &[Box<dyn ScalingStrategy>],
    cases: &[DemoCase],
) -> Vec<DemoResult> {
    cases
        .iter()
        .flat_map(|case| {
            strategies.iter().map(move |strategy| DemoResult {
                case: case.clone(),
                method: strategy.name(),
                outcome: strategy.scale(book, &case.recipe, case.known, case.target),
            })
        })
        .collect()
}

pub fn render_demo(results: &[DemoResult]) -> String {
    let rule = "=".repeat(50);
    let mut lines = vec![rule.clone(), "SCALING DEMONSTRATION".to_string(), rule];

    let mut current: Option<&DemoCase> = None;
    for result in results {
        if current != Some(&result.case) {
            lines.push(String::new());
            lines.push(format!(
                "Scaling {} for {} servings using data from {}",
                result.case.recipe, result.case.target, result.case.known
            ));
            lines.push("-".repeat(40));
            current = Some(&result.case);
        }

        lines.push(format!("{}:", result.method));
        match &result.outcome {
            Ok(scaled) => {
                for (ingredient, quantity) in scaled.iter().take(DEMO_INGREDIENT_LIMIT) {
                    lines.push(format!("  {}: {:.1}g", ingredient, quantity));
                }
            }
            Err(e) => lines.push(format!("  Error: {}", e)),
        }
    }

    lines.join("\n")
}

/// Full ingredient listing for a single scaled recipe.
pub fn render_scaled(
    recipe: &str,
    known: KnownServings,
    target: f64,
    method: &str,
    scaled: &IngredientTable,
) -> String {
    let mut lines = vec![
        format!("Scaling {} for {} servings", recipe, target),
        format!(
            "Using data from {} and {} servings ({})",
            known.first, known.second, method
        ),
        "-".repeat(50),
    ];
    lines.extend(
        scaled
            .iter()
            .map(|(ingredient, quantity)| format!("{}: {:.1} grams", ingredient, quantity)),
    );
    lines.join("\n")
}
