pub mod calorie;
pub mod ideal_weight;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_negative, validate_range};
use serde::{Deserialize, Serialize};

const KG_PER_LB: f64 = 0.453_592_37;
const CM_PER_INCH: f64 = 2.54;

pub const MIN_HEIGHT_CM: f64 = 100.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;
pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Body measurements normalised to metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl Body {
    pub fn metric(weight_kg: f64, height_cm: f64) -> Self {
        Self { weight_kg, height_cm }
    }

    pub fn imperial(weight_lb: f64, feet: f64, inches: f64) -> Self {
        Self {
            weight_kg: weight_lb * KG_PER_LB,
            height_cm: (feet * 12.0 + inches) * CM_PER_INCH,
        }
    }

    pub fn height_inches(&self) -> f64 {
        self.height_cm / CM_PER_INCH
    }

    pub fn bmi(&self) -> f64 {
        let meters = self.height_cm / 100.0;
        self.weight_kg / (meters * meters)
    }

    pub fn validate(&self) -> Result<()> {
        validate_non_negative("weight", self.weight_kg)?;
        validate_range("weight_kg", self.weight_kg, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
        validate_height(self.height_cm)
    }
}

pub fn validate_height(height_cm: f64) -> Result<()> {
    validate_range("height_cm", height_cm, MIN_HEIGHT_CM, MAX_HEIGHT_CM)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
