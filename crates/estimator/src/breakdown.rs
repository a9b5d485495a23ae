use models::{BreakdownEntry, ConsumptionResult};

/// Chart series, one bar per source, in display order.
pub fn usage_breakdown(result: &ConsumptionResult) -> Vec<BreakdownEntry> {
    let appliances = &result.appliance_energy_kwh;
    [
        ("Base", result.base_energy_kwh, "#4CAF50"),
        ("AC", appliances.air_conditioner, "#2196F3"),
        ("Fridge", appliances.refrigerator, "#FFC107"),
        ("Washing Machine", appliances.washing_machine, "#FF5722"),
    ]
    .into_iter()
    .map(|(label, kwh, color)| BreakdownEntry {
        label: label.to_string(),
        kwh,
        color: color.to_string(),
    })
    .collect()
}
