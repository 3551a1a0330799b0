use crate::utils::error::{Result, ScalerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Ingredient name to quantity in grams.
pub type IngredientTable = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub servings: BTreeMap<u32, IngredientTable>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            servings: BTreeMap::new(),
        }
    }

    /// Builder used for compiled-in tables and tests.
    pub fn with_serving(mut self, serving: u32, ingredients: &[(&str, f64)]) -> Self {
        let table = ingredients
            .iter()
            .map(|(name, grams)| (name.to_string(), *grams))
            .collect();
        self.servings.insert(serving, table);
        self
    }

    pub fn insert_serving(&mut self, serving: u32, table: IngredientTable) {
        self.servings.insert(serving, table);
    }

    pub fn serving(&self, serving: u32) -> Result<&IngredientTable> {
        self.servings
            .get(&serving)
            .ok_or_else(|| ScalerError::MissingServing {
                recipe: self.name.clone(),
                serving,
            })
    }

    pub fn serving_sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.servings.keys().copied()
    }
}

/// Read-only recipe table handed to strategies and the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: BTreeMap<String, Recipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.insert(recipe);
        self
    }

    pub fn insert(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.name.clone(), recipe);
    }

    pub fn recipe(&self, name: &str) -> Result<&Recipe> {
        self.recipes
            .get(name)
            .ok_or_else(|| ScalerError::MissingRecipe {
                recipe: name.to_string(),
            })
    }

    pub fn quantities(&self, recipe: &str, serving: u32) -> Result<&IngredientTable> {
        self.recipe(recipe)?.serving(serving)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// The two reference serving sizes (s1, s2) used as interpolation anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownServings {
    pub first: u32,
    pub second: u32,
}

impl KnownServings {
    pub fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    /// Equal anchors carry no slope information.
    pub fn is_degenerate(&self) -> bool {
        self.first == self.second
    }
}

impl Default for KnownServings {
    fn default() -> Self {
        Self::new(1, 3)
    }
}

impl fmt::Display for KnownServings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.second)
    }
}

impl FromStr for KnownServings {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(format!(
                "expected two serving sizes separated by a comma, got '{}'",
                s
            ));
        }
        let parse = |part: &str| {
            part.parse::<u32>()
                .map_err(|e| format!("invalid serving size '{}': {}", part, e))
        };
        Ok(Self::new(parse(parts[0])?, parse(parts[1])?))
    }
}

impl TryFrom<&[u32]> for KnownServings {
    type Error = ScalerError;

    fn try_from(values: &[u32]) -> Result<Self> {
        match values {
            [first, second] => Ok(Self::new(*first, *second)),
            _ => Err(ScalerError::InvalidConfigValueError {
                field: "known_servings".to_string(),
                value: format!("{:?}", values),
                reason: "Exactly two known serving sizes are required".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean absolute error in grams.
    pub mae: f64,
    /// Mean absolute percentage error, 0-100 scale.
    pub mape: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
}

/// Ingredients present in both tables, in `a`'s order, as `(name, qa, qb)`.
pub fn shared_ingredients<'a>(
    a: &'a IngredientTable,
    b: &'a IngredientTable,
) -> impl Iterator<Item = (&'a str, f64, f64)> + 'a {
    a.iter()
        .filter_map(move |(name, qa)| b.get(name).map(|qb| (name.as_str(), *qa, *qb)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> RecipeBook {
        RecipeBook::new().with_recipe(
            Recipe::new("dal")
                .with_serving(1, &[("Lentils", 80.0), ("Salt", 2.0)])
                .with_serving(2, &[("Lentils", 160.0), ("Ghee", 10.0)]),
        )
    }

    #[test]
    fn test_missing_recipe_is_detectable() {
        let book = sample_book();
        let err = book.recipe("biryani").unwrap_err();
        assert!(matches!(err, ScalerError::MissingRecipe { ref recipe } if recipe == "biryani"));
    }

    #[test]
    fn test_missing_serving_is_detectable() {
        let book = sample_book();
        let err = book.quantities("dal", 5).unwrap_err();
        assert!(matches!(err, ScalerError::MissingServing { serving: 5, .. }));
        assert_eq!(book.quantities("dal", 2).unwrap()["Lentils"], 160.0);
    }

    #[test]
    fn test_shared_ingredients_skips_absent_keys() {
        let book = sample_book();
        let one = book.quantities("dal", 1).unwrap();
        let two = book.quantities("dal", 2).unwrap();

        let shared: Vec<_> = shared_ingredients(one, two).collect();
        assert_eq!(shared, vec![("Lentils", 80.0, 160.0)]);
    }

    #[test]
    fn test_known_servings_from_str() {
        assert_eq!("1,3".parse::<KnownServings>().unwrap(), KnownServings::new(1, 3));
        assert_eq!(" 2 , 4 ".parse::<KnownServings>().unwrap(), KnownServings::new(2, 4));
        assert!("1".parse::<KnownServings>().is_err());
        assert!("1,2,3".parse::<KnownServings>().is_err());
        assert!("a,b".parse::<KnownServings>().is_err());
    }

    #[test]
    fn test_known_servings_try_from_slice() {
        let known = KnownServings::try_from(&[2u32, 2][..]).unwrap();
        assert!(known.is_degenerate());
        assert_eq!(known.to_string(), "[2, 2]");
        assert!(KnownServings::try_from(&[1u32][..]).is_err());
    }
}
