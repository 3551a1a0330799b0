use crate::core::evaluator::EvaluationReport;
use crate::domain::model::ReportFormat;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScalerError};
use serde::Serialize;

pub const SUMMARY_CSV: &str = "evaluation_summary.csv";
pub const PREDICTIONS_CSV: &str = "predictions.csv";
pub const REPORT_JSON: &str = "evaluation_report.json";

/// Ingredient rows shown per prediction in the console report.
const REPORT_INGREDIENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSettings {
    pub path: Option<String>,
    pub formats: Vec<ReportFormat>,
}

#[derive(Serialize)]
struct PredictionRow<'a> {
    recipe: &'a str,
    target: u32,
    method: &'a str,
    ingredient: &'a str,
    predicted: f64,
    actual: Option<f64>,
}

pub fn render_report(report: &EvaluationReport) -> String {
    let rule = "=".repeat(50);
    let mut lines = vec![
        "Recipe Scaling Evaluation".to_string(),
        rule,
        format!(
            "Known servings {}, target servings {:?}, {} trials",
            report.settings.known, report.settings.targets, report.settings.trials
        ),
    ];

    let mut current: Option<(&str, u32)> = None;
    for detail in &report.details {
        if current.map(|(recipe, _)| recipe) != Some(detail.recipe.as_str()) {
            lines.push(String::new());
            lines.push(format!("Testing {}:", detail.recipe));
        }
        if current != Some((detail.recipe.as_str(), detail.target)) {
            lines.push(format!("  Predicting for {} servings:", detail.target));
            current = Some((detail.recipe.as_str(), detail.target));
        }

        lines.push(format!(
            "    {}: MAE {:.2} grams, MAPE {:.2}%",
            detail.method, detail.metrics.mae, detail.metrics.mape
        ));
        for row in detail
            .ingredients
            .iter()
            .filter(|row| row.actual.is_some())
            .take(REPORT_INGREDIENT_LIMIT)
        {
            if let Some(actual) = row.actual {
                lines.push(format!(
                    "      {}: predicted={:.1}g, actual={:.1}g",
                    row.ingredient, row.predicted, actual
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("EVALUATION RESULTS:".to_string());
    lines.push("-".repeat(50));
    for summary in &report.summaries {
        lines.push(String::new());
        lines.push(format!("{}:", summary.method));
        match (summary.avg_mae, summary.avg_mape) {
            (Some(mae), Some(mape)) => {
                lines.push(format!("  Average MAE: {:.3} grams", mae));
                lines.push(format!("  Average MAPE: {:.2}%", mape));
            }
            _ => lines.push("  No scored samples".to_string()),
        }
        lines.push(format!(
            "  Samples: {} scored, {} skipped",
            summary.samples, summary.failures
        ));
    }

    lines.push(String::new());
    match &report.best_method {
        Some(best) => lines.push(format!("BEST METHOD: {}", best)),
        None => lines.push("BEST METHOD: none (no strategy produced a sample)".to_string()),
    }
    if let Some(grade) = report.grade() {
        lines.push(grade.description().to_string());
    }

    lines.join("\n")
}

fn summary_csv(report: &EvaluationReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for summary in &report.summaries {
        writer.serialize(summary)?;
    }
    writer
        .into_inner()
        .map_err(|e| ScalerError::IoError(e.into_error()))
}

fn predictions_csv(report: &EvaluationReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for detail in &report.details {
        for row in &detail.ingredients {
            writer.serialize(PredictionRow {
                recipe: &detail.recipe,
                target: detail.target,
                method: &detail.method,
                ingredient: &row.ingredient,
                predicted: row.predicted,
                actual: row.actual,
            })?;
        }
    }
    writer
        .into_inner()
        .map_err(|e| ScalerError::IoError(e.into_error()))
}

/// Writes the requested formats through `storage` and returns the file names.
pub fn export_report<S: Storage>(
    report: &EvaluationReport,
    storage: &S,
    formats: &[ReportFormat],
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    for format in formats {
        match format {
            ReportFormat::Csv => {
                storage.write_file(SUMMARY_CSV, &summary_csv(report)?)?;
                storage.write_file(PREDICTIONS_CSV, &predictions_csv(report)?)?;
                written.push(SUMMARY_CSV.to_string());
                written.push(PREDICTIONS_CSV.to_string());
            }
            ReportFormat::Json => {
                let json = serde_json::to_string_pretty(report)?;
                storage.write_file(REPORT_JSON, json.as_bytes())?;
                written.push(REPORT_JSON.to_string());
            }
        }
    }

    tracing::debug!("Exported report files: {:?}", written);
    Ok(written)
}
