use anyhow::{Context, Result, bail};
use clap::builder::RangedI64ValueParser;
use clap::{Parser, ValueEnum};
use estimator::{build_output, write_output_json, write_report};
use models::{
    BedroomConfig, EstimateOutput, FormulaPreset, HouseholdForm, ResidenceType, Settings, limits,
};
use std::ops::RangeInclusive;
use std::{
    fs,
    path::{Path, PathBuf},
};

fn ranged(range: RangeInclusive<u32>) -> RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(i64::from(*range.start())..=i64::from(*range.end()))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ResidenceArg {
    Flat,
    Tenament,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BhkArg {
    #[value(name = "1bhk")]
    One,
    #[value(name = "2bhk")]
    Two,
    #[value(name = "3bhk")]
    Three,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Detailed,
    FlatRate,
}

impl From<ResidenceArg> for ResidenceType {
    fn from(arg: ResidenceArg) -> Self {
        match arg {
            ResidenceArg::Flat => ResidenceType::Flat,
            ResidenceArg::Tenament => ResidenceType::Tenament,
        }
    }
}

impl From<BhkArg> for BedroomConfig {
    fn from(arg: BhkArg) -> Self {
        match arg {
            BhkArg::One => BedroomConfig::OneBhk,
            BhkArg::Two => BedroomConfig::TwoBhk,
            BhkArg::Three => BedroomConfig::ThreeBhk,
        }
    }
}

impl From<PresetArg> for FormulaPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Detailed => FormulaPreset::Detailed,
            PresetArg::FlatRate => FormulaPreset::FlatRate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "estimate-energy",
    about = "Estimate household energy use, monthly bill and CO₂ from home size and appliances."
)]
struct Args {
    /// Read the whole form from a JSON file instead of flags
    #[arg(
        long,
        conflicts_with_all = [
            "name", "age", "city", "area", "residence", "bhk",
            "ac_count", "ac_hours", "fridge_count", "wm_count", "wm_hours",
        ]
    )]
    profile: Option<PathBuf>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long, default_value_t = 25, value_parser = ranged(limits::AGE))]
    age: u32,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    area: Option<String>,

    #[arg(long, value_enum, default_value_t = ResidenceArg::Flat)]
    residence: ResidenceArg,

    #[arg(long, value_enum, default_value_t = BhkArg::One)]
    bhk: BhkArg,

    /// Number of air conditioners; enables the AC
    #[arg(long, value_parser = ranged(limits::AC_COUNT))]
    ac_count: Option<u32>,

    /// Hours per day each AC runs
    #[arg(long, default_value_t = 6, value_parser = ranged(limits::AC_HOURS))]
    ac_hours: u32,

    /// Number of refrigerators; enables the fridge (always on)
    #[arg(long, value_parser = ranged(limits::FRIDGE_COUNT))]
    fridge_count: Option<u32>,

    /// Number of washing machines; enables the washing machine
    #[arg(long, value_parser = ranged(limits::WASHING_MACHINE_COUNT))]
    wm_count: Option<u32>,

    /// Hours per day each washing machine runs
    #[arg(long, default_value_t = 1, value_parser = ranged(limits::WASHING_MACHINE_HOURS))]
    wm_hours: u32,

    /// Settings file; defaults to ./settings.json when present
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Formula preset, overriding the settings file
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Tariff in ₹ per kWh
    #[arg(long)]
    rate: Option<f64>,

    /// kg CO₂ per kWh
    #[arg(long)]
    emission_factor: Option<f64>,

    /// Write the plain-text report here (e.g. energy_report.txt)
    #[arg(long)]
    report_out: Option<PathBuf>,

    /// Write the full estimate as JSON here
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Args {
    fn to_form(&self) -> HouseholdForm {
        let defaults = HouseholdForm::default();
        HouseholdForm {
            name: self.name.clone().unwrap_or_default(),
            age: self.age,
            city: self.city.clone().unwrap_or_default(),
            area: self.area.clone().unwrap_or_default(),
            residence_type: self.residence.into(),
            bedroom_config: self.bhk.into(),
            has_ac: self.ac_count.is_some(),
            ac_count: self.ac_count.unwrap_or(defaults.ac_count),
            ac_hours: self.ac_hours,
            has_fridge: self.fridge_count.is_some(),
            fridge_count: self.fridge_count.unwrap_or(defaults.fridge_count),
            has_washing_machine: self.wm_count.is_some(),
            washing_machine_count: self.wm_count.unwrap_or(defaults.washing_machine_count),
            washing_machine_hours: self.wm_hours,
        }
    }
}

fn read_form(path: &Path) -> Result<HouseholdForm> {
    let txt = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let form: HouseholdForm =
        serde_json::from_str(&txt).with_context(|| format!("parsing {}", path.display()))?;

    let violations = form.check_limits();
    if !violations.is_empty() {
        bail!("{} is out of range: {}", path.display(), violations.join("; "));
    }
    Ok(form)
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings) = settings_loader::load_optional_settings(path)? {
        return Ok(settings);
    }
    match settings_loader::load_settings_with_fallback(None)? {
        Some(settings) => Ok(settings),
        None => {
            tracing::debug!("no settings file found, using built-in defaults");
            Ok(Settings::default())
        }
    }
}

fn print_output(output: &EstimateOutput) {
    let summary = &output.summary;
    println!("Calculation complete ({} formula)", output.metadata.preset);
    println!();
    println!("  Daily Usage       : {}", summary.daily_usage);
    println!("  Monthly Usage     : {}", summary.monthly_usage);
    println!("  Est. Monthly Bill : {}", summary.monthly_bill);
    println!("  Daily CO₂ Emission: {}", summary.daily_co2);
    println!();
    println!("Daily Usage Breakdown");
    for entry in &output.breakdown {
        println!("  {:<16} {:>8.2} kWh", entry.label, entry.kwh);
    }
    println!();
    println!("User Summary");
    println!("  Name     : {}", summary.name);
    println!("  Age      : {}", summary.age);
    println!("  Location : {}", summary.location);
    println!("  Residence: {}", summary.residence);
    println!();
    println!("Energy Saving Tips");
    for tip in &output.tips {
        println!("  • {}", tip);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let form = match &args.profile {
        Some(path) => read_form(path)?,
        None => args.to_form(),
    };
    let settings = load_settings(args.settings.as_ref())?;
    let config = settings
        .formula_config_for(args.preset.map(FormulaPreset::from))
        .with_overrides(args.rate, args.emission_factor);

    let output = build_output(form.into_profile(), &config).context("estimating consumption")?;
    print_output(&output);

    if let Some(path) = &args.report_out {
        write_report(&output.report, path)?;
        println!();
        println!("Report written to {}", path.display());
    }
    if let Some(path) = &args.json {
        write_output_json(&output, path)?;
        println!("Estimate written to {}", path.display());
    }
    Ok(())
}
