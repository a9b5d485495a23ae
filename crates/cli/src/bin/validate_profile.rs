use anyhow::{Context, Result, anyhow};
use clap::Parser;
use models::HouseholdForm;
use serde_json::Value;
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "validate-profile",
    about = "Check household form JSON files against the input limits."
)]
struct Args {
    /// Form files to check
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Default)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }
    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
    fn print(&self, file: &str) {
        for w in &self.warnings {
            println!("[WARN] {}: {}", file, w);
        }
        for e in &self.errors {
            println!("[ERROR] {}: {}", file, e);
        }
    }
    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Keys, aliases included, that only matter while `flag` is checked.
fn warn_stale(rep: &mut Report, val: &Value, flag: &str, enabled: bool, keys: &[&str]) {
    if enabled {
        return;
    }
    for key in keys {
        if val.get(*key).is_some() {
            rep.warn(format!("'{}' is set but '{}' is false; value ignored", key, flag));
        }
    }
}

fn validate_form(val: &Value) -> Report {
    let mut rep = Report::default();

    let form: HouseholdForm = match serde_json::from_value(val.clone()) {
        Ok(form) => form,
        Err(e) => {
            rep.error(format!("not a valid household form: {}", e));
            return rep;
        }
    };

    for (field, value) in [("name", &form.name), ("city", &form.city), ("area", &form.area)] {
        if value.trim().is_empty() {
            rep.error(format!("'{}' is required", field));
        }
    }
    for violation in form.check_limits() {
        rep.error(violation);
    }

    warn_stale(&mut rep, val, "has_ac", form.has_ac, &["ac_count", "ac_hours"]);
    warn_stale(&mut rep, val, "has_fridge", form.has_fridge, &["fridge_count"]);
    warn_stale(
        &mut rep,
        val,
        "has_washing_machine",
        form.has_washing_machine,
        &[
            "washing_machine_count",
            "wm_count",
            "washing_machine_hours",
            "wm_hours",
        ],
    );
    if let Some(hours) = val.get("fridge_hours").and_then(|v| v.as_u64()) {
        if hours != 24 {
            rep.warn(format!("'fridge_hours' is {}; fridges are always counted at 24", hours));
        }
    }

    rep
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut any_errors = false;
    for path in &args.inputs {
        let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let txt =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let val: Value =
            serde_json::from_str(&txt).with_context(|| format!("parsing {}", path.display()))?;
        let report = validate_form(&val);
        report.print(file_name);
        if report.has_errors() {
            any_errors = true;
        }
    }

    if any_errors {
        Err(anyhow!("Validation failed"))
    } else {
        println!("All profiles passed validation.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_form_passes() {
        let val = json!({
            "name": "Lata",
            "age": 60,
            "city": "Nashik",
            "area": "Gangapur Road",
            "bedroom_config": "3BHK",
            "has_ac": true,
            "ac_count": 2,
            "ac_hours": 8,
            "has_fridge": true,
            "fridge_count": 1
        });

        let rep = validate_form(&val);

        assert!(!rep.has_errors());
        assert!(rep.warnings.is_empty());
    }

    #[test]
    fn test_missing_required_and_out_of_range() {
        let val = json!({
            "name": " ",
            "city": "Nashik",
            "age": 130,
            "has_ac": true,
            "ac_count": 9
        });

        let rep = validate_form(&val);

        assert!(rep.errors.iter().any(|e| e.contains("'name' is required")));
        assert!(rep.errors.iter().any(|e| e.contains("'area' is required")));
        assert!(rep.errors.iter().any(|e| e.contains("'age' is 130")));
        assert!(rep.errors.iter().any(|e| e.contains("'ac_count' is 9")));
    }

    #[test]
    fn test_stale_values_are_warnings() {
        let val = json!({
            "name": "Lata",
            "city": "Nashik",
            "area": "Panchavati",
            "has_washing_machine": false,
            "washing_machine_count": 2,
            "washing_machine_hours": 9,
            "has_fridge": true,
            "fridge_hours": 12
        });

        let rep = validate_form(&val);

        assert!(!rep.has_errors());
        assert_eq!(rep.warnings.len(), 3);
    }

    #[test]
    fn test_stale_values_under_alias_keys() {
        let val = json!({
            "name": "Lata",
            "city": "Nashik",
            "area": "Panchavati",
            "washing_machine": false,
            "wm_count": 2,
            "wm_hours": 4
        });

        let rep = validate_form(&val);

        assert!(!rep.has_errors());
        assert_eq!(rep.warnings.len(), 2);
        assert!(rep.warnings[0].contains("'wm_count' is set but 'has_washing_machine' is false"));
    }

    #[test]
    fn test_unknown_bedroom_config() {
        let val = json!({ "name": "Lata", "city": "Nashik", "area": "X", "bedroom_config": "5BHK" });

        let rep = validate_form(&val);

        assert!(rep.has_errors());
        assert!(rep.errors[0].contains("not a valid household form"));
    }
}
