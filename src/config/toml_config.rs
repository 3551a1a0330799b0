use crate::config::builtin::builtin_recipes;
use crate::core::evaluator::{DEFAULT_TARGET_SERVINGS, DEFAULT_TRIALS};
use crate::core::ConfigProvider;
use crate::domain::model::{KnownServings, Recipe, RecipeBook, ReportFormat};
use crate::utils::error::{Result, ScalerError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_quantity,
    validate_required_field, validate_serving_key, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serving size (as written in the file) to ingredient quantities.
pub type RawServings = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub evaluation: Option<EvaluationConfig>,
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub recipes: BTreeMap<String, RawServings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub trials: Option<usize>,
    pub known_servings: Option<Vec<u32>>,
    pub target_servings: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub formats: Option<Vec<ReportFormat>>,
}

const DEFAULT_FORMATS: [ReportFormat; 2] = [ReportFormat::Csv, ReportFormat::Json];

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScalerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScalerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScalerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Recipes from the file, or the built-in table when the file has none.
    pub fn recipe_book(&self) -> Result<RecipeBook> {
        if self.recipes.is_empty() {
            tracing::debug!("No [recipes] in configuration, using the built-in table");
            return Ok(builtin_recipes());
        }

        let mut book = RecipeBook::new();
        for (name, servings) in &self.recipes {
            validate_non_empty_string("recipes", name)?;
            let mut recipe = Recipe::new(name.as_str());

            for (key, ingredients) in servings {
                let field = format!("recipes.{}.{}", name, key);
                let serving = validate_serving_key(&field, key)?;
                for (ingredient, quantity) in ingredients {
                    validate_quantity(&format!("{}.{}", field, ingredient), *quantity)?;
                }
                recipe.insert_serving(serving, ingredients.clone());
            }

            book.insert(recipe);
        }

        tracing::debug!("Loaded {} recipes from configuration", book.len());
        Ok(book)
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(evaluation) = &self.evaluation {
            if let Some(trials) = evaluation.trials {
                validate_positive_number("evaluation.trials", trials, 1)?;
            }
            if let Some(known) = &evaluation.known_servings {
                KnownServings::try_from(known.as_slice()).map_err(|_| {
                    ScalerError::InvalidConfigValueError {
                        field: "evaluation.known_servings".to_string(),
                        value: format!("{:?}", known),
                        reason: "Exactly two known serving sizes are required".to_string(),
                    }
                })?;
            }
            if let Some(targets) = &evaluation.target_servings {
                validate_positive_number("evaluation.target_servings", targets.len(), 1)?;
            }
        }

        if let Some(output) = &self.output {
            let path = validate_required_field("output.path", &output.path)?;
            validate_path("output.path", path)?;
        }

        self.recipe_book().map(|_| ())
    }
}

impl ConfigProvider for TomlConfig {
    fn trials(&self) -> usize {
        self.evaluation
            .as_ref()
            .and_then(|e| e.trials)
            .unwrap_or(DEFAULT_TRIALS)
    }

    fn known_servings(&self) -> KnownServings {
        self.evaluation
            .as_ref()
            .and_then(|e| e.known_servings.as_deref())
            .and_then(|known| KnownServings::try_from(known).ok())
            .unwrap_or_default()
    }

    fn target_servings(&self) -> &[u32] {
        self.evaluation
            .as_ref()
            .and_then(|e| e.target_servings.as_deref())
            .unwrap_or(&DEFAULT_TARGET_SERVINGS)
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    fn output_formats(&self) -> &[ReportFormat] {
        self.output
            .as_ref()
            .and_then(|o| o.formats.as_deref())
            .unwrap_or(&DEFAULT_FORMATS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
