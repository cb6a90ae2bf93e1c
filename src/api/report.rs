use super::GoalResponse;
use crate::core::{ChartData, GoalBasis, SipInputs, SipProjection};

const LABEL_WIDTH: usize = 24;

fn amount(value: f64, currency: &str) -> String {
    format!("{currency}{value:.2}")
}

fn push_row(out: &mut String, label: &str, value: String) {
    out.push_str(&format!("{label:<width$}{value}\n", width = LABEL_WIDTH));
}

pub(super) fn render_projection_report(
    inputs: &SipInputs,
    projection: &SipProjection,
    chart: &ChartData,
    currency: &str,
    explain: bool,
) -> String {
    let mut out = format!(
        "SIP projection: {} years ({} months) at {}% a year\n\n",
        inputs.years,
        inputs.months(),
        inputs.annual_return
    );

    push_row(&mut out, "Future Value:", amount(projection.future_value, currency));
    push_row(
        &mut out,
        "Lump Sum Future Value:",
        amount(projection.lump_sum_future, currency),
    );
    push_row(
        &mut out,
        "Inflation Adjusted:",
        amount(projection.adjusted_future_value, currency),
    );
    push_row(&mut out, "Total Invested:", amount(projection.total_invested, currency));
    push_row(
        &mut out,
        "Total Interest Earned:",
        amount(projection.total_interest, currency),
    );

    if !chart.labels.is_empty() {
        out.push_str("\nYear  Growth\n");
        for (year, value) in chart.labels.iter().zip(&chart.growth) {
            out.push_str(&format!("{year:>4}  {}\n", amount(*value, currency)));
        }
    }

    if explain {
        out.push('\n');
        out.push_str("How the figures are calculated:\n");
        out.push_str("  SIP future value       FV = P x [((1 + r)^n - 1) / r] x (1 + r)\n");
        out.push_str("                         P = monthly SIP, r = annual return / 12 / 100, n = months\n");
        out.push_str("                         with step-up, P grows by the step-up rate every 12 months\n");
        out.push_str("  Lump sum future value  FV = L x (1 + R)^years, R = annual return / 100\n");
        out.push_str("  Inflation adjusted     (FV + lump sum FV) / (1 + inflation / 100)^years\n");
    }

    out
}

pub(super) fn render_goal_report(goal: &GoalResponse, currency: &str) -> String {
    let basis = match GoalBasis::from(goal.basis) {
        GoalBasis::Nominal => "nominal",
        GoalBasis::InflationAdjusted => "inflation-adjusted",
    };
    let mut out = format!(
        "SIP goal: {} ({basis}) in {} years\n\n",
        amount(goal.target_corpus, currency),
        goal.inputs.years
    );

    match goal.required_sip {
        Some(required) => push_row(&mut out, "Required Monthly SIP:", amount(required, currency)),
        None => push_row(&mut out, "Required Monthly SIP:", "not reachable".to_string()),
    }
    push_row(
        &mut out,
        "Covered by Lump Sum:",
        amount(goal.lump_sum_contribution, currency),
    );
    if let Some(projection) = &goal.projection {
        push_row(&mut out, "Total Invested:", amount(projection.total_invested, currency));
        push_row(
            &mut out,
            "Total Interest Earned:",
            amount(projection.total_interest, currency),
        );
    }
    out.push_str(&format!("\n{}\n", goal.message));

    out
}
