use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use models::{ConsumptionResult, HouseholdProfile};

use crate::round2;

/// File name offered when the report is downloaded.
pub const REPORT_FILE_NAME: &str = "energy_report.txt";
pub const CURRENCY_SYMBOL: &str = "₹";

/// Plain-text report with the same fields, in the same order, as the
/// on-screen summary.
pub fn render_report(profile: &HouseholdProfile, result: &ConsumptionResult) -> String {
    let appliances = &result.appliance_energy_kwh;
    let lines = [
        format!("Energy Report for {}", profile.name),
        "-------------------------".to_string(),
        format!(
            "Residence: {} in {}, {}",
            profile.bedrooms, profile.area, profile.city
        ),
        format!("Daily Consumption: {:.2} kWh", result.daily_total_kwh),
        format!("Monthly Consumption: {:.2} kWh", result.monthly_total_kwh),
        format!("Monthly Cost: {}{:.0}", CURRENCY_SYMBOL, result.monthly_cost),
        format!("CO₂ Emission (daily): {:.2} kg", result.daily_co2_kg),
        String::new(),
        "Appliance Breakdown:".to_string(),
        format!("- Base Energy: {} kWh", round2(result.base_energy_kwh)),
        format!("- AC: {:.2} kWh", appliances.air_conditioner),
        format!("- Fridge: {:.2} kWh", appliances.refrigerator),
        format!("- Washing Machine: {:.2} kWh", appliances.washing_machine),
    ];

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

pub fn write_report(report: &str, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating directory {}", parent.display()))?;
        }
    }
    fs::write(out_path, report).with_context(|| format!("Writing report {}", out_path.display()))?;
    Ok(())
}
