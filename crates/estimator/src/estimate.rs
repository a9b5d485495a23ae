use models::{ApplianceEnergy, ConsumptionResult, FormulaConfig, HouseholdProfile};

use crate::error::{RequiredField, ValidationError};

pub const DAYS_PER_MONTH: f64 = 30.0;

/// Computes daily and monthly consumption, cost and emissions for one
/// submission. Only the required text fields are checked; numeric ranges are
/// the caller's business.
pub fn estimate(
    profile: &HouseholdProfile,
    config: &FormulaConfig,
) -> Result<ConsumptionResult, ValidationError> {
    validate_required(profile)?;

    let base_energy_kwh = config.base_load.daily_kwh(profile.bedrooms);
    let appliance_energy_kwh = ApplianceEnergy {
        air_conditioner: config
            .air_conditioner
            .daily_kwh(profile.air_conditioner.as_ref()),
        refrigerator: config
            .refrigerator
            .daily_kwh(profile.refrigerator.as_ref()),
        washing_machine: config
            .washing_machine
            .daily_kwh(profile.washing_machine.as_ref()),
    };

    // Summed left to right so results stay bit-identical across runs.
    let daily_total_kwh = base_energy_kwh
        + appliance_energy_kwh.air_conditioner
        + appliance_energy_kwh.refrigerator
        + appliance_energy_kwh.washing_machine;
    let monthly_total_kwh = daily_total_kwh * DAYS_PER_MONTH;
    let monthly_cost = monthly_total_kwh * config.rate_per_kwh;
    let daily_co2_kg = daily_total_kwh * config.emission_factor;

    tracing::debug!(
        preset = %config.preset,
        bedrooms = %profile.bedrooms,
        daily_total_kwh,
        monthly_cost,
        "estimated household consumption"
    );

    Ok(ConsumptionResult {
        base_energy_kwh,
        appliance_energy_kwh,
        daily_total_kwh,
        monthly_total_kwh,
        monthly_cost,
        daily_co2_kg,
    })
}

fn validate_required(profile: &HouseholdProfile) -> Result<(), ValidationError> {
    let fields = [
        (RequiredField::Name, &profile.name),
        (RequiredField::City, &profile.city),
        (RequiredField::Area, &profile.area),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField(field));
        }
    }
    Ok(())
}
