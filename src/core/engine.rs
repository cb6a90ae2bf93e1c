use super::types::{
    Breakdown, ChartData, GrowthSeries, SipError, SipInputs, SipProjection, YearPoint,
};

/// Running state of the monthly contribution stream.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    monthly_growth: f64,
    step_up_factor: f64,
    sip: f64,
    future_value: f64,
    total_invested: f64,
}

impl Accumulator {
    fn new(inputs: &SipInputs) -> Self {
        Self {
            monthly_growth: 1.0 + inputs.annual_return / 100.0 / 12.0,
            step_up_factor: 1.0 + inputs.step_up / 100.0,
            sip: inputs.sip_amount,
            future_value: 0.0,
            total_invested: 0.0,
        }
    }

    // Contribution lands first, then the month compounds.
    fn advance_month(&mut self, month: u32) {
        if month > 0 && month % 12 == 0 {
            self.sip *= self.step_up_factor;
        }
        self.future_value = (self.future_value + self.sip) * self.monthly_growth;
        self.total_invested += self.sip;
    }
}

pub fn project(inputs: &SipInputs) -> Result<SipProjection, SipError> {
    inputs.validate()?;

    let mut acc = Accumulator::new(inputs);
    for month in 0..inputs.months() {
        acc.advance_month(month);
    }

    let lump_sum_future = inputs.lump_sum * annual_factor(inputs.annual_return, inputs.years);
    let nominal_total = acc.future_value + lump_sum_future;
    let adjusted_future_value = nominal_total / annual_factor(inputs.inflation_rate, inputs.years);
    let total_interest = nominal_total - (acc.total_invested + inputs.lump_sum);

    Ok(SipProjection {
        future_value: acc.future_value,
        lump_sum_future,
        adjusted_future_value,
        total_invested: acc.total_invested,
        total_interest,
    })
}

/// End-of-year snapshots of the same monthly loop `project` runs.
pub fn yearly_trajectory(inputs: &SipInputs) -> Result<Vec<YearPoint>, SipError> {
    inputs.validate()?;

    let mut points = Vec::with_capacity(inputs.years as usize);
    let mut acc = Accumulator::new(inputs);
    for month in 0..inputs.months() {
        acc.advance_month(month);
        if (month + 1) % 12 != 0 {
            continue;
        }

        let year = (month + 1) / 12;
        let lump_sum_value = inputs.lump_sum * annual_factor(inputs.annual_return, year);
        let total_value = acc.future_value + lump_sum_value;
        points.push(YearPoint {
            year,
            invested: acc.total_invested,
            sip_value: acc.future_value,
            lump_sum_value,
            total_value,
            real_value: total_value / annual_factor(inputs.inflation_rate, year),
        });
    }

    Ok(points)
}

pub fn chart_data(
    inputs: &SipInputs,
    projection: &SipProjection,
    series: GrowthSeries,
) -> Result<ChartData, SipError> {
    let labels = (1..=inputs.years).collect::<Vec<_>>();
    let growth = match series {
        GrowthSeries::Divided => labels
            .iter()
            .map(|&year| projection.future_value / year as f64)
            .collect(),
        GrowthSeries::Trajectory => yearly_trajectory(inputs)?
            .into_iter()
            .map(|point| point.sip_value)
            .collect(),
    };

    Ok(ChartData {
        labels,
        growth,
        breakdown: Breakdown {
            total_invested: projection.total_invested,
            total_interest: projection.total_interest,
        },
    })
}

/// `FV = P * [((1 + r)^n - 1) / r] * (1 + r)`; a level SIP with no step-up.
pub fn closed_form_future_value(monthly: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return monthly * months as f64;
    }
    let growth = (1.0 + monthly_rate).powf(months as f64);
    monthly * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}

fn annual_factor(rate_percent: f64, years: u32) -> f64 {
    (1.0 + rate_percent / 100.0).powf(years as f64)
}
