use crate::utils::error::{CellError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_zero_step(field_name: &str, step: i64) -> Result<()> {
    if step == 0 {
        return Err(CellError::invalid_argument(
            field_name,
            step,
            "step must be a non-zero integer",
        ));
    }
    Ok(())
}

pub fn validate_bounds(field_name: &str, lower: Option<i64>, upper: Option<i64>) -> Result<()> {
    if let (Some(lo), Some(hi)) = (lower, upper) {
        if lo > hi {
            return Err(CellError::invalid_argument(
                field_name,
                format!("[{}, {}]", lo, hi),
                "lower bound must not exceed upper bound",
            ));
        }
    }
    Ok(())
}

pub fn validate_within_bounds(
    field_name: &str,
    value: i64,
    lower: Option<i64>,
    upper: Option<i64>,
) -> Result<()> {
    if let Some(lo) = lower {
        if value < lo {
            return Err(CellError::invalid_argument(
                field_name,
                value,
                format!("Value must be at least {}", lo),
            ));
        }
    }
    if let Some(hi) = upper {
        if value > hi {
            return Err(CellError::invalid_argument(
                field_name,
                value,
                format!("Value must be at most {}", hi),
            ));
        }
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CellError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("Value {} must be at least {}", value, min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CellError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CellError::ConfigValidationError {
                field: field_name.to_string(),
                message: format!("Duplicate name: {}", name),
            });
        }
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CellError::MissingConfigError {
        field: field_name.to_string(),
    })
}
