use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScalerError {
    #[error("Recipe not found: {recipe}")]
    MissingRecipe { recipe: String },

    #[error("Serving size {serving} is not recorded for recipe {recipe}")]
    MissingServing { recipe: String, serving: u32 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Evaluation error: {message}")]
    EvaluationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Configuration,
    Io,
    Evaluation,
}

impl ScalerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScalerError::MissingRecipe { .. } | ScalerError::MissingServing { .. } => {
                ErrorCategory::Lookup
            }
            ScalerError::ConfigValidationError { .. }
            | ScalerError::InvalidConfigValueError { .. }
            | ScalerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScalerError::CsvError(_)
            | ScalerError::IoError(_)
            | ScalerError::SerializationError(_) => ErrorCategory::Io,
            ScalerError::EvaluationError { .. } => ErrorCategory::Evaluation,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScalerError::MissingRecipe { .. } => {
                "Check the recipe name against the loaded recipe table".to_string()
            }
            ScalerError::MissingServing { recipe, .. } => format!(
                "Use serving sizes that are recorded for {} as known or target servings",
                recipe
            ),
            ScalerError::ConfigValidationError { field, .. }
            | ScalerError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the configuration", field)
            }
            ScalerError::MissingConfigError { field } => {
                format!("Add the '{}' entry to the configuration", field)
            }
            ScalerError::CsvError(_) | ScalerError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            ScalerError::SerializationError(_) => {
                "Report data could not be serialized; rerun with --verbose".to_string()
            }
            ScalerError::EvaluationError { .. } => {
                "Register at least one scaling strategy before evaluating".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Lookup => format!("Lookup failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("Could not write output: {}", self),
            ErrorCategory::Evaluation => format!("Evaluation could not run: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScalerError>;
