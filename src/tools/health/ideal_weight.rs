use super::{round1, validate_height, Body, Sex};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use serde::{Deserialize, Serialize};

const BMI_HEALTHY_MIN: f64 = 18.5;
const BMI_HEALTHY_MAX: f64 = 24.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdealWeightFormula {
    Devine,
    Robinson,
    Miller,
    Hamwi,
}

impl IdealWeightFormula {
    pub const ALL: [IdealWeightFormula; 4] = [
        IdealWeightFormula::Devine,
        IdealWeightFormula::Robinson,
        IdealWeightFormula::Miller,
        IdealWeightFormula::Hamwi,
    ];

    /// (kg at five feet, kg per inch above five feet)
    fn constants(&self, sex: Sex) -> (f64, f64) {
        match (self, sex) {
            (IdealWeightFormula::Devine, Sex::Male) => (50.0, 2.3),
            (IdealWeightFormula::Devine, Sex::Female) => (45.5, 2.3),
            (IdealWeightFormula::Robinson, Sex::Male) => (52.0, 1.9),
            (IdealWeightFormula::Robinson, Sex::Female) => (49.0, 1.7),
            (IdealWeightFormula::Miller, Sex::Male) => (56.2, 1.41),
            (IdealWeightFormula::Miller, Sex::Female) => (53.1, 1.36),
            (IdealWeightFormula::Hamwi, Sex::Male) => (48.0, 2.7),
            (IdealWeightFormula::Hamwi, Sex::Female) => (45.5, 2.2),
        }
    }

    pub fn weight_kg(&self, sex: Sex, height_cm: f64) -> f64 {
        let (base, per_inch) = self.constants(sex);
        let inches_over_five_feet = height_cm / 2.54 - 60.0;
        (base + per_inch * inches_over_five_feet).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormulaWeight {
    pub formula: IdealWeightFormula,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentWeight {
    pub weight_kg: f64,
    pub bmi: f64,
    /// Positive when above the formula average.
    pub difference_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealWeightResult {
    pub height_cm: f64,
    pub formulas: Vec<FormulaWeight>,
    pub average_kg: f64,
    pub healthy_min_kg: f64,
    pub healthy_max_kg: f64,
    pub current: Option<CurrentWeight>,
}

pub fn calculate(
    sex: Sex,
    height_cm: f64,
    current_weight_kg: Option<f64>,
) -> Result<IdealWeightResult> {
    validate_height(height_cm)?;
    if let Some(weight) = current_weight_kg {
        validate_range("weight_kg", weight, super::MIN_WEIGHT_KG, super::MAX_WEIGHT_KG)?;
    }

    let formulas: Vec<FormulaWeight> = IdealWeightFormula::ALL
        .iter()
        .map(|&formula| FormulaWeight {
            formula,
            weight_kg: round1(formula.weight_kg(sex, height_cm)),
        })
        .collect();

    let average = IdealWeightFormula::ALL
        .iter()
        .map(|f| f.weight_kg(sex, height_cm))
        .sum::<f64>()
        / IdealWeightFormula::ALL.len() as f64;

    let meters = height_cm / 100.0;
    let current = current_weight_kg.map(|weight| CurrentWeight {
        weight_kg: weight,
        bmi: round1(Body::metric(weight, height_cm).bmi()),
        difference_kg: round1(weight - average),
    });

    Ok(IdealWeightResult {
        height_cm,
        formulas,
        average_kg: round1(average),
        healthy_min_kg: round1(BMI_HEALTHY_MIN * meters * meters),
        healthy_max_kg: round1(BMI_HEALTHY_MAX * meters * meters),
        current,
    })
}
