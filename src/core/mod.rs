mod engine;
mod solver;
mod types;

pub use engine::{chart_data, closed_form_future_value, project, yearly_trajectory};
pub use solver::solve_required_sip;
pub use types::{
    Breakdown, ChartData, GoalBasis, GoalResult, GrowthSeries, SipError, SipInputs, SipProjection,
    YearPoint,
};
