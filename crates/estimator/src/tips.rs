use models::{ConsumptionResult, HouseholdProfile};

/// Appended to every tip list, in this order.
pub const GENERAL_TIPS: [&str; 3] = [
    "Use LED bulbs instead of incandescent ones.",
    "Unplug devices when not in use.",
    "Use natural daylight when possible.",
];

pub const AC_HOURS_THRESHOLD: u32 = 6;
pub const FRIDGE_COUNT_THRESHOLD: u32 = 1;
pub const WASHING_MACHINE_HOURS_THRESHOLD: u32 = 2;

const AC_TIP: &str = "Reduce AC usage or set temperature to 24°C.";
const FRIDGE_TIP: &str = "Consider using one energy-efficient fridge.";
const WASHING_MACHINE_TIP: &str = "Use quick wash cycles to reduce washing machine usage.";

/// Usage-triggered advice first, then the general tips.
pub fn generate_tips(profile: &HouseholdProfile, _result: &ConsumptionResult) -> Vec<String> {
    let mut tips = Vec::with_capacity(GENERAL_TIPS.len() + 3);

    if profile
        .air_conditioner
        .is_some_and(|ac| ac.hours_per_day > AC_HOURS_THRESHOLD)
    {
        tips.push(AC_TIP.to_string());
    }
    if profile
        .refrigerator
        .is_some_and(|fridge| fridge.count > FRIDGE_COUNT_THRESHOLD)
    {
        tips.push(FRIDGE_TIP.to_string());
    }
    if profile
        .washing_machine
        .is_some_and(|wm| wm.hours_per_day > WASHING_MACHINE_HOURS_THRESHOLD)
    {
        tips.push(WASHING_MACHINE_TIP.to_string());
    }

    tips.extend(GENERAL_TIPS.iter().map(|tip| tip.to_string()));
    tips
}
