use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SipError {
    #[error("{field} must be a finite number, got {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum GrowthSeries {
    /// Final SIP value divided by `year index + 1`. Reproduces the legacy
    /// widget curve; it is not a real growth path.
    Divided,
    #[default]
    Trajectory,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum GoalBasis {
    #[default]
    Nominal,
    InflationAdjusted,
}

/// Percent-denominated plan parameters, as a user would type them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipInputs {
    pub sip_amount: f64,
    pub annual_return: f64,
    pub years: u32,
    pub lump_sum: f64,
    pub step_up: f64,
    pub inflation_rate: f64,
}

impl Default for SipInputs {
    fn default() -> Self {
        Self {
            sip_amount: 5_000.0,
            annual_return: 12.0,
            years: 10,
            lump_sum: 0.0,
            step_up: 0.0,
            inflation_rate: 0.0,
        }
    }
}

impl SipInputs {
    pub fn validate(&self) -> Result<(), SipError> {
        let fields = [
            ("sipAmount", self.sip_amount),
            ("annualReturn", self.annual_return),
            ("lumpSum", self.lump_sum),
            ("stepUp", self.step_up),
            ("inflationRate", self.inflation_rate),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SipError::InvalidInput { field, value });
            }
        }
        Ok(())
    }

    pub fn months(&self) -> u32 {
        self.years.saturating_mul(12)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipProjection {
    pub future_value: f64,
    pub lump_sum_future: f64,
    pub adjusted_future_value: f64,
    pub total_invested: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: u32,
    pub invested: f64,
    pub sip_value: f64,
    pub lump_sum_value: f64,
    pub total_value: f64,
    pub real_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub total_invested: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<u32>,
    pub growth: Vec<f64>,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone)]
pub struct GoalResult {
    pub target: f64,
    pub basis: GoalBasis,
    pub required_sip: Option<f64>,
    /// Corpus produced per unit of initial monthly contribution, on `basis`.
    pub unit_future_value: f64,
    /// Part of the target already covered by the lump sum, on `basis`.
    pub lump_sum_contribution: f64,
    pub feasible: bool,
    pub message: String,
}
