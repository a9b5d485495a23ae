pub mod breakdown;
pub mod error;
pub mod estimate;
pub mod report;
pub mod summary;
pub mod tips;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::Local;
use models::{EstimateMetadata, EstimateOutput, FormulaConfig, HouseholdProfile};

pub use breakdown::usage_breakdown;
pub use error::{RequiredField, ValidationError};
pub use estimate::{estimate, DAYS_PER_MONTH};
pub use report::{render_report, write_report, REPORT_FILE_NAME};
pub use summary::render_summary;
pub use tips::{generate_tips, GENERAL_TIPS};

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Runs the estimate and every presentation step for one submission.
pub fn build_output(
    profile: HouseholdProfile,
    config: &FormulaConfig,
) -> std::result::Result<EstimateOutput, ValidationError> {
    let result = estimate(&profile, config)?;
    let summary = render_summary(&profile, &result);
    let breakdown = usage_breakdown(&result);
    let tips = generate_tips(&profile, &result);
    let report = render_report(&profile, &result);

    Ok(EstimateOutput {
        metadata: EstimateMetadata {
            generated_at: Local::now().to_rfc3339(),
            preset: config.preset,
        },
        profile,
        result,
        summary,
        breakdown,
        tips,
        report,
    })
}

pub fn write_output_json(output: &EstimateOutput, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating directory {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(output)?;
    fs::write(out_path, json).with_context(|| format!("Writing {}", out_path.display()))?;
    Ok(())
}
