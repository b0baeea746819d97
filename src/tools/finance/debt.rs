use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_non_negative, validate_non_empty_string, validate_range};
use serde::{Deserialize, Serialize};

/// 模擬上限：50 年
pub const MAX_MONTHS: u32 = 600;

const PAID_OFF_EPSILON: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,
    pub balance: f64,
    /// Annual percentage rate, e.g. `18.9` for 18.9%.
    pub apr: f64,
    pub minimum_payment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest interest rate first.
    Avalanche,
    /// Smallest balance first.
    Snowball,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub debts: Vec<Debt>,
    pub extra_payment: f64,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtPayoff {
    pub name: String,
    pub month: u32,
    pub interest_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffResult {
    pub strategy: Strategy,
    pub months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub payoff_order: Vec<DebtPayoff>,
    pub schedule: Vec<MonthRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyComparison {
    pub avalanche: PayoffResult,
    pub snowball: PayoffResult,
    pub interest_saved_with_avalanche: f64,
    pub months_difference: i64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn monthly_rate(apr: f64) -> f64 {
    apr / 12.0 / 100.0
}

/// Months needed to repay a single balance with a fixed payment.
///
/// Returns `None` when the payment never gets ahead of the interest. Unlike
/// [`simulate`], the closed form is not bounded by [`MAX_MONTHS`].
pub fn months_to_payoff(balance: f64, apr: f64, payment: f64) -> Option<u32> {
    if balance <= 0.0 {
        return Some(0);
    }
    if payment <= 0.0 || !payment.is_finite() || !balance.is_finite() {
        return None;
    }

    let rate = monthly_rate(apr);
    let months = if rate == 0.0 {
        balance / payment
    } else {
        if payment <= rate * balance {
            return None;
        }
        -(1.0 - rate * balance / payment).ln() / (1.0 + rate).ln()
    };

    // 浮點誤差：10.0000000001 不應該進位成 11
    let months = (months - 1e-9).ceil().max(1.0);
    Some(months.min(u32::MAX as f64) as u32)
}

impl PayoffPlan {
    pub fn validate(&self) -> Result<()> {
        if self.debts.is_empty() {
            return Err(ToolError::MissingInputError {
                field: "debts".to_string(),
            });
        }
        for debt in &self.debts {
            validate_non_empty_string("debt.name", &debt.name)?;
            validate_non_negative("debt.balance", debt.balance)?;
            validate_range("debt.apr", debt.apr, 0.0, 100.0)?;
            validate_non_negative("debt.minimum_payment", debt.minimum_payment)?;
        }
        validate_non_negative("extra_payment", self.extra_payment)
    }

    fn monthly_budget(&self) -> f64 {
        self.debts.iter().map(|d| d.minimum_payment).sum::<f64>() + self.extra_payment
    }

    /// Debt indices in the order extra money is applied.
    fn target_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.debts.len()).collect();
        match self.strategy {
            Strategy::Avalanche => order.sort_by(|&a, &b| {
                self.debts[b].apr.total_cmp(&self.debts[a].apr)
            }),
            Strategy::Snowball => order.sort_by(|&a, &b| {
                self.debts[a].balance.total_cmp(&self.debts[b].balance)
            }),
        }
        order
    }
}

pub fn simulate(plan: &PayoffPlan) -> Result<PayoffResult> {
    plan.validate()?;

    let budget = plan.monthly_budget();
    let first_interest: f64 = plan
        .debts
        .iter()
        .map(|d| d.balance * monthly_rate(d.apr))
        .sum();
    let total_balance: f64 = plan.debts.iter().map(|d| d.balance).sum();

    if total_balance > 0.0 && budget <= first_interest {
        return Err(ToolError::PaymentTooLowError {
            payment: budget,
            interest: first_interest,
        });
    }

    let order = plan.target_order();
    let mut balances: Vec<f64> = plan.debts.iter().map(|d| d.balance).collect();
    let mut interest_by_debt = vec![0.0; balances.len()];
    let mut paid_off: Vec<Option<u32>> = balances
        .iter()
        .map(|&b| if b <= PAID_OFF_EPSILON { Some(0) } else { None })
        .collect();

    let mut schedule = Vec::new();
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;
    let mut month = 0;

    while balances.iter().any(|&b| b > PAID_OFF_EPSILON) {
        if month == MAX_MONTHS {
            return Err(ToolError::invalid_input(
                "extra_payment",
                plan.extra_payment,
                format!("debts are not repaid within {} months", MAX_MONTHS),
            ));
        }
        month += 1;

        let mut month_interest = 0.0;
        for (i, balance) in balances.iter_mut().enumerate() {
            if *balance > PAID_OFF_EPSILON {
                let interest = *balance * monthly_rate(plan.debts[i].apr);
                *balance += interest;
                interest_by_debt[i] += interest;
                month_interest += interest;
            }
        }

        let mut available = budget;

        // 先付每筆最低還款
        for (i, balance) in balances.iter_mut().enumerate() {
            let payment = plan.debts[i].minimum_payment.min(*balance).min(available);
            *balance -= payment;
            available -= payment;
        }

        // 剩餘金額(含已還清債務釋出的最低還款)依策略滾到目標債務
        for &i in &order {
            if available <= 0.0 {
                break;
            }
            let payment = available.min(balances[i]);
            balances[i] -= payment;
            available -= payment;
        }

        for (i, balance) in balances.iter_mut().enumerate() {
            if paid_off[i].is_none() && *balance <= PAID_OFF_EPSILON {
                *balance = 0.0;
                paid_off[i] = Some(month);
            }
        }

        let payment = budget - available;
        total_paid += payment;
        total_interest += month_interest;

        schedule.push(MonthRow {
            month,
            payment: round2(payment),
            interest: round2(month_interest),
            remaining_balance: round2(balances.iter().sum()),
        });
    }

    let mut payoff_order: Vec<DebtPayoff> = plan
        .debts
        .iter()
        .enumerate()
        .map(|(i, debt)| DebtPayoff {
            name: debt.name.clone(),
            month: paid_off[i].unwrap_or(month),
            interest_paid: round2(interest_by_debt[i]),
        })
        .collect();
    payoff_order.sort_by_key(|p| p.month);

    tracing::debug!(
        "{:?} plan: {} months, interest {:.2}",
        plan.strategy,
        month,
        total_interest
    );

    Ok(PayoffResult {
        strategy: plan.strategy,
        months: month,
        total_interest: round2(total_interest),
        total_paid: round2(total_paid),
        payoff_order,
        schedule,
    })
}

pub fn compare(plan: &PayoffPlan) -> Result<StrategyComparison> {
    let avalanche = simulate(&PayoffPlan {
        strategy: Strategy::Avalanche,
        ..plan.clone()
    })?;
    let snowball = simulate(&PayoffPlan {
        strategy: Strategy::Snowball,
        ..plan.clone()
    })?;

    Ok(StrategyComparison {
        interest_saved_with_avalanche: round2(snowball.total_interest - avalanche.total_interest),
        months_difference: snowball.months as i64 - avalanche.months as i64,
        avalanche,
        snowball,
    })
}

pub fn write_schedule_csv<W: std::io::Write>(result: &PayoffResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &result.schedule {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
