use super::{Body, Sex};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use serde::{Deserialize, Serialize};

pub const MIN_AGE: u32 = 15;
pub const MAX_AGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum BmrFormula {
    #[default]
    MifflinStJeor,
    HarrisBenedict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    Maintain,
    MildLoss,
    Loss,
    ExtremeLoss,
    MildGain,
    Gain,
}

impl Goal {
    pub const ALL: [Goal; 6] = [
        Goal::Maintain,
        Goal::MildLoss,
        Goal::Loss,
        Goal::ExtremeLoss,
        Goal::MildGain,
        Goal::Gain,
    ];

    /// Daily kcal adjustment; 500 kcal/day is roughly 0.5 kg per week.
    pub fn adjustment(&self) -> f64 {
        match self {
            Goal::Maintain => 0.0,
            Goal::MildLoss => -250.0,
            Goal::Loss => -500.0,
            Goal::ExtremeLoss => -1000.0,
            Goal::MildGain => 250.0,
            Goal::Gain => 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieInput {
    pub age: u32,
    pub sex: Sex,
    pub body: Body,
    pub activity: ActivityLevel,
    #[serde(default)]
    pub formula: BmrFormula,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalCalories {
    pub goal: Goal,
    pub calories: f64,
    /// Set when the target was raised to the safe minimum.
    pub clamped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Macros {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieResult {
    pub bmr: f64,
    pub tdee: f64,
    pub goals: Vec<GoalCalories>,
    pub macros: Macros,
}

fn minimum_intake(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 1500.0,
        Sex::Female => 1200.0,
    }
}

pub fn bmr(input: &CalorieInput) -> f64 {
    let w = input.body.weight_kg;
    let h = input.body.height_cm;
    let a = input.age as f64;

    match (input.formula, input.sex) {
        (BmrFormula::MifflinStJeor, Sex::Male) => 10.0 * w + 6.25 * h - 5.0 * a + 5.0,
        (BmrFormula::MifflinStJeor, Sex::Female) => 10.0 * w + 6.25 * h - 5.0 * a - 161.0,
        (BmrFormula::HarrisBenedict, Sex::Male) => 88.362 + 13.397 * w + 4.799 * h - 5.677 * a,
        (BmrFormula::HarrisBenedict, Sex::Female) => 447.593 + 9.247 * w + 3.098 * h - 4.330 * a,
    }
}

/// 30% protein, 40% carbohydrate, 30% fat.
pub fn macros_for(calories: f64) -> Macros {
    Macros {
        protein_g: (calories * 0.30 / 4.0).round(),
        carbs_g: (calories * 0.40 / 4.0).round(),
        fat_g: (calories * 0.30 / 9.0).round(),
    }
}

pub fn calculate(input: &CalorieInput) -> Result<CalorieResult> {
    validate_range("age", input.age, MIN_AGE, MAX_AGE)?;
    input.body.validate()?;

    let bmr = bmr(input);
    let tdee = bmr * input.activity.multiplier();
    let floor = minimum_intake(input.sex);

    let goals = Goal::ALL
        .iter()
        .map(|&goal| {
            let target = tdee + goal.adjustment();
            GoalCalories {
                goal,
                calories: target.max(floor).round(),
                clamped: target < floor,
            }
        })
        .collect();

    tracing::debug!("BMR {:.1} kcal, TDEE {:.1} kcal", bmr, tdee);

    Ok(CalorieResult {
        bmr: bmr.round(),
        tdee: tdee.round(),
        goals,
        macros: macros_for(tdee.round()),
    })
}
