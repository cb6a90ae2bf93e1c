use super::{GoalBasis, GoalResult, SipError, SipInputs, project};

const MIN_UNIT_FUTURE_VALUE: f64 = 1e-12;

/// Initial monthly contribution needed for the projected corpus to reach
/// `target`. The SIP future value is linear in the starting contribution
/// (step-up scales every later month by the same factor), so one unit
/// projection is enough; no search is needed.
pub fn solve_required_sip(
    inputs: &SipInputs,
    target: f64,
    basis: GoalBasis,
) -> Result<GoalResult, SipError> {
    if !target.is_finite() {
        return Err(SipError::InvalidInput {
            field: "targetCorpus",
            value: target,
        });
    }

    let lump_only = project(&SipInputs {
        sip_amount: 0.0,
        ..*inputs
    })?;
    let unit = project(&SipInputs {
        sip_amount: 1.0,
        lump_sum: 0.0,
        ..*inputs
    })?;

    let (lump_sum_contribution, unit_future_value) = match basis {
        GoalBasis::Nominal => (lump_only.lump_sum_future, unit.future_value),
        GoalBasis::InflationAdjusted => {
            (lump_only.adjusted_future_value, unit.adjusted_future_value)
        }
    };

    let mut result = GoalResult {
        target,
        basis,
        required_sip: None,
        unit_future_value,
        lump_sum_contribution,
        feasible: false,
        message: String::new(),
    };

    if !unit_future_value.is_finite() || !lump_sum_contribution.is_finite() {
        // An inflation rate of -100% zeroes the deflator.
        result.message =
            "Inflation-adjusted corpus is undefined for these inputs.".to_string();
    } else if lump_sum_contribution >= target {
        result.required_sip = Some(0.0);
        result.feasible = true;
        result.message = "Lump sum alone already meets the target.".to_string();
    } else if unit_future_value <= MIN_UNIT_FUTURE_VALUE {
        result.message =
            "Monthly contributions cannot build a positive corpus over this horizon.".to_string();
    } else {
        result.required_sip = Some((target - lump_sum_contribution) / unit_future_value);
        result.feasible = true;
        result.message = "Solved required monthly contribution.".to_string();
    }

    Ok(result)
}
