use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// one day's fitness record. `date` is the delete key but is not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessEntry {
    pub date: String,
    pub steps: i64,
    pub calories: i64,
    pub distance: f64,
    pub active_minutes: i64,
}

impl FitnessEntry {
    pub fn new<T: Into<String>>(
        date: T,
        steps: i64,
        calories: i64,
        distance: f64,
        active_minutes: i64,
    ) -> Self {
        Self {
            date: date.into(),
            steps,
            calories,
            distance,
            active_minutes,
        }
    }
}

/// raw body of `POST /add`
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    pub date: String,
    pub steps: String,
    pub calories: String,
    pub distance: String,
    pub active_minutes: String,
}

#[inline]
fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, AppError> {
    value.trim().parse::<T>().map_err(|_| AppError::InvalidField {
        field,
        value: value.to_owned(),
    })
}

/// `f64::from_str` accepts nan and inf, which serde_json writes as `null`
#[inline]
fn parse_finite(field: &'static str, value: &str) -> Result<f64, AppError> {
    let d: f64 = parse_field(field, value)?;
    if !d.is_finite() {
        return Err(AppError::InvalidField {
            field,
            value: value.to_owned(),
        });
    }
    Ok(d)
}

impl EntryForm {
    /// coerces the submitted strings into an entry
    pub fn parse(self) -> Result<FitnessEntry, AppError> {
        Ok(FitnessEntry {
            steps: parse_field("steps", &self.steps)?,
            calories: parse_field("calories", &self.calories)?,
            distance: parse_finite("distance", &self.distance)?,
            active_minutes: parse_field("active_minutes", &self.active_minutes)?,
            date: self.date,
        })
    }
}

/// raw body of `POST /delete`
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub date: String,
}
