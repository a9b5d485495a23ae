use std::fmt;
use thiserror::Error;

/// Text fields the form must not leave blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    City,
    Area,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Name => f.write_str("name"),
            RequiredField::City => f.write_str("city"),
            RequiredField::Area => f.write_str("area"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in Name, City, and Area (missing: {0})")]
    MissingRequiredField(RequiredField),
}
