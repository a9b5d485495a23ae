use models::{ConsumptionResult, HouseholdProfile, UsageSummary};

use crate::report::CURRENCY_SYMBOL;

/// Metrics and user details as shown after a successful calculation.
pub fn render_summary(profile: &HouseholdProfile, result: &ConsumptionResult) -> UsageSummary {
    UsageSummary {
        daily_usage: format!("{:.2} kWh", result.daily_total_kwh),
        monthly_usage: format!("{:.2} kWh", result.monthly_total_kwh),
        monthly_bill: format!("{}{:.0}", CURRENCY_SYMBOL, result.monthly_cost),
        daily_co2: format!("{:.2} kg", result.daily_co2_kg),
        name: profile.name.clone(),
        age: profile.age,
        location: format!("{}, {}", profile.area, profile.city),
        residence: format!("{} ({})", profile.residence, profile.bedrooms),
    }
}
