use serde::{Deserialize, Serialize};
use std::fmt;

// Household description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResidenceType {
	#[default]
	#[serde(alias = "flat")]
	Flat,
	#[serde(alias = "tenament")]
	Tenament,
}

impl fmt::Display for ResidenceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResidenceType::Flat => f.write_str("Flat"),
			ResidenceType::Tenament => f.write_str("Tenament"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BedroomConfig {
	#[default]
	#[serde(rename = "1BHK", alias = "1bhk")]
	OneBhk,
	#[serde(rename = "2BHK", alias = "2bhk")]
	TwoBhk,
	#[serde(rename = "3BHK", alias = "3bhk")]
	ThreeBhk,
}

impl BedroomConfig {
	pub fn bedrooms(self) -> u32 {
		match self {
			BedroomConfig::OneBhk => 1,
			BedroomConfig::TwoBhk => 2,
			BedroomConfig::ThreeBhk => 3,
		}
	}

	/// Bedrooms plus the hall; the unit the per-room base load is counted in.
	pub fn rooms(self) -> u32 {
		self.bedrooms() + 1
	}
}

impl fmt::Display for BedroomConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}BHK", self.bedrooms())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplianceUsage {
	pub count: u32,
	pub hours_per_day: u32,
}

impl ApplianceUsage {
	pub const ALWAYS_ON_HOURS: u32 = 24;

	pub fn new(count: u32, hours_per_day: u32) -> Self {
		Self { count, hours_per_day }
	}

	/// Usage for appliances that never switch off (refrigerators).
	pub fn always_on(count: u32) -> Self {
		Self::new(count, Self::ALWAYS_ON_HOURS)
	}
}

/// One submission, built atomically from the form. A `None` appliance is
/// switched off and has no count or hours to go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
	pub name: String,
	pub age: u32,
	pub city: String,
	pub area: String,
	pub residence: ResidenceType,
	pub bedrooms: BedroomConfig,
	#[serde(default)]
	pub air_conditioner: Option<ApplianceUsage>,
	#[serde(default)]
	pub refrigerator: Option<ApplianceUsage>,
	#[serde(default)]
	pub washing_machine: Option<ApplianceUsage>,
}

// Raw form payload, one field per widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdForm {
	#[serde(default)]
	pub name: String,
	#[serde(default = "default_age")]
	pub age: u32,
	#[serde(default)]
	pub city: String,
	#[serde(default)]
	pub area: String,
	#[serde(default, alias = "flat_tenament", alias = "residence")]
	pub residence_type: ResidenceType,
	#[serde(default, alias = "facility", alias = "bhk")]
	pub bedroom_config: BedroomConfig,
	#[serde(default, alias = "ac")]
	pub has_ac: bool,
	#[serde(default = "default_count")]
	pub ac_count: u32,
	#[serde(default = "default_ac_hours")]
	pub ac_hours: u32,
	#[serde(default, alias = "fridge")]
	pub has_fridge: bool,
	#[serde(default = "default_count")]
	pub fridge_count: u32,
	#[serde(default, alias = "washing_machine")]
	pub has_washing_machine: bool,
	#[serde(default = "default_count", alias = "wm_count")]
	pub washing_machine_count: u32,
	#[serde(default = "default_count", alias = "wm_hours")]
	pub washing_machine_hours: u32,
}

fn default_age() -> u32 {
	25
}
fn default_count() -> u32 {
	1
}
fn default_ac_hours() -> u32 {
	6
}

impl Default for HouseholdForm {
	fn default() -> Self {
		Self {
			name: String::new(),
			age: default_age(),
			city: String::new(),
			area: String::new(),
			residence_type: ResidenceType::default(),
			bedroom_config: BedroomConfig::default(),
			has_ac: false,
			ac_count: default_count(),
			ac_hours: default_ac_hours(),
			has_fridge: false,
			fridge_count: default_count(),
			has_washing_machine: false,
			washing_machine_count: default_count(),
			washing_machine_hours: default_count(),
		}
	}
}

impl HouseholdForm {
	/// Values of unchecked appliances are dropped here, so the profile never
	/// carries them.
	pub fn into_profile(self) -> HouseholdProfile {
		HouseholdProfile {
			air_conditioner: self
				.has_ac
				.then(|| ApplianceUsage::new(self.ac_count, self.ac_hours)),
			refrigerator: self
				.has_fridge
				.then(|| ApplianceUsage::always_on(self.fridge_count)),
			washing_machine: self.has_washing_machine.then(|| {
				ApplianceUsage::new(self.washing_machine_count, self.washing_machine_hours)
			}),
			name: self.name,
			age: self.age,
			city: self.city,
			area: self.area,
			residence: self.residence_type,
			bedrooms: self.bedroom_config,
		}
	}

	/// Widget ranges the form breaks, one message per field. Values of
	/// unchecked appliances are not looked at since they are dropped anyway.
	pub fn check_limits(&self) -> Vec<String> {
		let mut checks = vec![("age", self.age, limits::AGE)];
		if self.has_ac {
			checks.push(("ac_count", self.ac_count, limits::AC_COUNT));
			checks.push(("ac_hours", self.ac_hours, limits::AC_HOURS));
		}
		if self.has_fridge {
			checks.push(("fridge_count", self.fridge_count, limits::FRIDGE_COUNT));
		}
		if self.has_washing_machine {
			checks.push((
				"washing_machine_count",
				self.washing_machine_count,
				limits::WASHING_MACHINE_COUNT,
			));
			checks.push((
				"washing_machine_hours",
				self.washing_machine_hours,
				limits::WASHING_MACHINE_HOURS,
			));
		}

		checks
			.into_iter()
			.filter(|(_, value, range)| !range.contains(value))
			.map(|(field, value, range)| {
				format!(
					"'{}' is {}, expected {}..={}",
					field,
					value,
					range.start(),
					range.end()
				)
			})
			.collect()
	}
}

impl From<HouseholdForm> for HouseholdProfile {
	fn from(form: HouseholdForm) -> Self {
		form.into_profile()
	}
}

/// Ranges of the input widgets. The estimator does not check them; the
/// front ends do, through [`HouseholdForm::check_limits`] or clap parsers.
pub mod limits {
	use std::ops::RangeInclusive;

	pub const AGE: RangeInclusive<u32> = 1..=120;
	pub const AC_COUNT: RangeInclusive<u32> = 1..=5;
	pub const AC_HOURS: RangeInclusive<u32> = 1..=24;
	pub const FRIDGE_COUNT: RangeInclusive<u32> = 1..=3;
	pub const WASHING_MACHINE_COUNT: RangeInclusive<u32> = 1..=2;
	pub const WASHING_MACHINE_HOURS: RangeInclusive<u32> = 1..=5;
}

// Formula configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaPreset {
	/// Count × hours × coefficient per appliance, tabulated base load.
	#[default]
	Detailed,
	/// Flat daily energy per enabled appliance, per-room base load.
	#[serde(alias = "flat-rate", alias = "flat")]
	FlatRate,
}

impl FormulaPreset {
	pub const ALL: [FormulaPreset; 2] = [FormulaPreset::Detailed, FormulaPreset::FlatRate];

	pub fn config(self) -> FormulaConfig {
		match self {
			FormulaPreset::Detailed => FormulaConfig::detailed(),
			FormulaPreset::FlatRate => FormulaConfig::flat_rate(),
		}
	}
}

impl fmt::Display for FormulaPreset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FormulaPreset::Detailed => f.write_str("detailed"),
			FormulaPreset::FlatRate => f.write_str("flat_rate"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BaseLoadModel {
	/// kWh/day looked up by bedroom configuration
	Table {
		one_bhk: f64,
		two_bhk: f64,
		three_bhk: f64,
	},
	/// Sum of `rooms × factor` over all factors
	PerRoom { factors: Vec<f64> },
}

impl BaseLoadModel {
	pub fn daily_kwh(&self, bedrooms: BedroomConfig) -> f64 {
		match self {
			BaseLoadModel::Table {
				one_bhk,
				two_bhk,
				three_bhk,
			} => match bedrooms {
				BedroomConfig::OneBhk => *one_bhk,
				BedroomConfig::TwoBhk => *two_bhk,
				BedroomConfig::ThreeBhk => *three_bhk,
			},
			BaseLoadModel::PerRoom { factors } => {
				let rooms = bedrooms.rooms() as f64;
				factors.iter().fold(0.0, |acc, factor| acc + rooms * factor)
			}
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApplianceModel {
	Metered { kwh_per_unit_hour: f64 },
	Flat { kwh_per_day: f64 },
}

impl ApplianceModel {
	/// Energy of an appliance; zero when it is switched off.
	pub fn daily_kwh(&self, usage: Option<&ApplianceUsage>) -> f64 {
		let Some(usage) = usage else {
			return 0.0;
		};
		match self {
			ApplianceModel::Metered { kwh_per_unit_hour } => {
				usage.count as f64 * usage.hours_per_day as f64 * kwh_per_unit_hour
			}
			ApplianceModel::Flat { kwh_per_day } => *kwh_per_day,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaConfig {
	#[serde(default)]
	pub preset: FormulaPreset,
	pub base_load: BaseLoadModel,
	pub air_conditioner: ApplianceModel,
	pub refrigerator: ApplianceModel,
	pub washing_machine: ApplianceModel,
	/// Currency units per kWh
	pub rate_per_kwh: f64,
	/// kg CO₂ per kWh
	pub emission_factor: f64,
}

impl FormulaConfig {
	pub const DEFAULT_RATE_PER_KWH: f64 = 5.0;
	pub const DEFAULT_EMISSION_FACTOR: f64 = 0.92;

	pub fn detailed() -> Self {
		Self {
			preset: FormulaPreset::Detailed,
			base_load: BaseLoadModel::Table {
				one_bhk: 2.4,
				two_bhk: 3.6,
				three_bhk: 4.8,
			},
			air_conditioner: ApplianceModel::Metered {
				kwh_per_unit_hour: 1.5,
			},
			refrigerator: ApplianceModel::Metered {
				kwh_per_unit_hour: 0.125,
			},
			washing_machine: ApplianceModel::Metered {
				kwh_per_unit_hour: 0.5,
			},
			rate_per_kwh: Self::DEFAULT_RATE_PER_KWH,
			emission_factor: Self::DEFAULT_EMISSION_FACTOR,
		}
	}

	pub fn flat_rate() -> Self {
		let flat = ApplianceModel::Flat { kwh_per_day: 3.0 };
		Self {
			preset: FormulaPreset::FlatRate,
			base_load: BaseLoadModel::PerRoom {
				factors: vec![0.4, 0.8],
			},
			air_conditioner: flat,
			refrigerator: flat,
			washing_machine: flat,
			rate_per_kwh: Self::DEFAULT_RATE_PER_KWH,
			emission_factor: Self::DEFAULT_EMISSION_FACTOR,
		}
	}

	pub fn with_overrides(mut self, rate_per_kwh: Option<f64>, emission_factor: Option<f64>) -> Self {
		if let Some(rate) = rate_per_kwh {
			self.rate_per_kwh = rate;
		}
		if let Some(factor) = emission_factor {
			self.emission_factor = factor;
		}
		self
	}
}

impl Default for FormulaConfig {
	fn default() -> Self {
		Self::detailed()
	}
}

// Settings models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	#[serde(default = "default_settings_version")]
	pub settings_version: u32,
	#[serde(default)]
	pub preset: FormulaPreset,
	#[serde(default)]
	pub rate_per_kwh: Option<f64>,
	#[serde(default)]
	pub emission_factor: Option<f64>,
	/// Full formula; replaces `preset` when present
	#[serde(default)]
	pub formula: Option<FormulaConfig>,
}

fn default_settings_version() -> u32 {
	1
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			settings_version: default_settings_version(),
			preset: FormulaPreset::default(),
			rate_per_kwh: None,
			emission_factor: None,
			formula: None,
		}
	}
}

impl Settings {
	pub fn formula_config(&self) -> FormulaConfig {
		self.formula_config_for(None)
	}

	/// Config for an explicitly requested preset, or the configured one.
	/// Rate and emission overrides from the settings apply either way.
	pub fn formula_config_for(&self, preset: Option<FormulaPreset>) -> FormulaConfig {
		let base = match (preset, &self.formula) {
			(Some(p), _) => p.config(),
			(None, Some(formula)) => formula.clone(),
			(None, None) => self.preset.config(),
		};
		base.with_overrides(self.rate_per_kwh, self.emission_factor)
	}
}

// Output models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplianceEnergy {
	pub air_conditioner: f64,
	pub refrigerator: f64,
	pub washing_machine: f64,
}

impl ApplianceEnergy {
	pub fn total(&self) -> f64 {
		self.air_conditioner + self.refrigerator + self.washing_machine
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionResult {
	pub base_energy_kwh: f64,
	pub appliance_energy_kwh: ApplianceEnergy,
	pub daily_total_kwh: f64,
	pub monthly_total_kwh: f64,
	pub monthly_cost: f64,
	pub daily_co2_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
	pub daily_usage: String,
	pub monthly_usage: String,
	pub monthly_bill: String,
	pub daily_co2: String,
	pub name: String,
	pub age: u32,
	pub location: String,
	pub residence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
	pub label: String,
	pub kwh: f64,
	pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateMetadata {
	pub generated_at: String,
	pub preset: FormulaPreset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateOutput {
	pub metadata: EstimateMetadata,
	pub profile: HouseholdProfile,
	pub result: ConsumptionResult,
	pub summary: UsageSummary,
	pub breakdown: Vec<BreakdownEntry>,
	pub tips: Vec<String>,
	pub report: String,
}
