use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

use crate::core::{
    ChartData, GoalBasis, GrowthSeries, SipError, SipInputs, SipProjection, YearPoint,
    chart_data, project, solve_required_sip, yearly_trajectory,
};

mod report;

use report::{render_goal_report, render_projection_report};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Upper bound on the horizon accepted from the CLI and HTTP surfaces.
pub const MAX_YEARS: u32 = 200;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliGrowthSeries {
    Trajectory,
    Divided,
}

impl From<CliGrowthSeries> for GrowthSeries {
    fn from(value: CliGrowthSeries) -> Self {
        match value {
            CliGrowthSeries::Trajectory => GrowthSeries::Trajectory,
            CliGrowthSeries::Divided => GrowthSeries::Divided,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliGoalBasis {
    Nominal,
    InflationAdjusted,
}

impl From<CliGoalBasis> for GoalBasis {
    fn from(value: CliGoalBasis) -> Self {
        match value {
            CliGoalBasis::Nominal => GoalBasis::Nominal,
            CliGoalBasis::InflationAdjusted => GoalBasis::InflationAdjusted,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiGrowthSeries {
    Trajectory,
    #[serde(alias = "legacy")]
    Divided,
}

impl From<ApiGrowthSeries> for GrowthSeries {
    fn from(value: ApiGrowthSeries) -> Self {
        match value {
            ApiGrowthSeries::Trajectory => GrowthSeries::Trajectory,
            ApiGrowthSeries::Divided => GrowthSeries::Divided,
        }
    }
}

impl From<GrowthSeries> for ApiGrowthSeries {
    fn from(value: GrowthSeries) -> Self {
        match value {
            GrowthSeries::Trajectory => ApiGrowthSeries::Trajectory,
            GrowthSeries::Divided => ApiGrowthSeries::Divided,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiGoalBasis {
    Nominal,
    #[serde(alias = "inflationAdjusted", alias = "inflation_adjusted", alias = "real")]
    InflationAdjusted,
}

impl From<ApiGoalBasis> for GoalBasis {
    fn from(value: ApiGoalBasis) -> Self {
        match value {
            ApiGoalBasis::Nominal => GoalBasis::Nominal,
            ApiGoalBasis::InflationAdjusted => GoalBasis::InflationAdjusted,
        }
    }
}

impl From<GoalBasis> for ApiGoalBasis {
    fn from(value: GoalBasis) -> Self {
        match value {
            GoalBasis::Nominal => ApiGoalBasis::Nominal,
            GoalBasis::InflationAdjusted => ApiGoalBasis::InflationAdjusted,
        }
    }
}

/// Query/JSON body shared by both endpoints. `targetCorpus` and `basis`
/// are only read by `/api/goal`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SipPayload {
    sip_amount: Option<f64>,
    annual_return: Option<f64>,
    years: Option<u32>,
    lump_sum: Option<f64>,
    step_up: Option<f64>,
    inflation_rate: Option<f64>,
    growth_series: Option<ApiGrowthSeries>,

    target_corpus: Option<f64>,
    basis: Option<ApiGoalBasis>,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(
        long,
        default_value_t = 5000.0,
        allow_negative_numbers = true,
        help = "Initial monthly contribution"
    )]
    pub sip_amount: f64,
    #[arg(
        long,
        default_value_t = 12.0,
        allow_negative_numbers = true,
        help = "Expected annual return in percent, e.g. 12"
    )]
    pub annual_return: f64,
    #[arg(long, default_value_t = 10, help = "Investment horizon in whole years")]
    pub years: u32,
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        help = "One-time initial contribution"
    )]
    pub lump_sum: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        help = "Annual increase of the monthly contribution in percent"
    )]
    pub step_up: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        help = "Expected annual inflation in percent"
    )]
    pub inflation_rate: f64,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    #[arg(long, value_enum, default_value_t = CliGrowthSeries::Trajectory)]
    pub growth_series: CliGrowthSeries,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    #[arg(long, default_value = "₹", help = "Currency symbol for table output")]
    pub currency: String,
    #[arg(long, help = "Print the formulas behind the figures")]
    pub explain: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GoalArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    #[arg(long, help = "Corpus to reach at the end of the horizon")]
    pub target_corpus: f64,
    #[arg(long, value_enum, default_value_t = CliGoalBasis::Nominal)]
    pub basis: CliGoalBasis,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    #[arg(long, default_value = "₹", help = "Currency symbol for table output")]
    pub currency: String,
}

#[derive(Debug)]
struct ProjectionRequest {
    inputs: SipInputs,
    series: GrowthSeries,
}

#[derive(Debug)]
struct GoalRequest {
    inputs: SipInputs,
    target: f64,
    basis: GoalBasis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    inputs: SipInputs,
    growth_series: ApiGrowthSeries,
    #[serde(flatten)]
    projection: SipProjection,
    chart: ChartData,
    yearly: Vec<YearPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalResponse {
    inputs: SipInputs,
    target_corpus: f64,
    basis: ApiGoalBasis,
    required_sip: Option<f64>,
    unit_future_value: f64,
    lump_sum_contribution: f64,
    feasible: bool,
    message: String,
    projection: Option<SipProjection>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(plan: &PlanArgs) -> Result<SipInputs, String> {
    if plan.years > MAX_YEARS {
        return Err(format!("--years must be <= {MAX_YEARS}"));
    }

    let inputs = SipInputs {
        sip_amount: plan.sip_amount,
        annual_return: plan.annual_return,
        years: plan.years,
        lump_sum: plan.lump_sum,
        step_up: plan.step_up,
        inflation_rate: plan.inflation_rate,
    };
    inputs.validate().map_err(|e| e.to_string())?;
    Ok(inputs)
}

/// Renders the `project` subcommand output.
pub fn run_project_command(args: &ProjectArgs) -> Result<String, String> {
    let inputs = build_inputs(&args.plan)?;
    let series = GrowthSeries::from(args.growth_series);
    let response = build_projection_response(&inputs, series).map_err(|e| e.to_string())?;
    tracing::debug!(
        years = inputs.years,
        future_value = response.projection.future_value,
        "computed projection"
    );

    match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)
            .map_err(|e| format!("failed to serialize projection: {e}")),
        OutputFormat::Table => Ok(render_projection_report(
            &inputs,
            &response.projection,
            &response.chart,
            &args.currency,
            args.explain,
        )),
    }
}

/// Renders the `goal` subcommand output.
pub fn run_goal_command(args: &GoalArgs) -> Result<String, String> {
    let inputs = build_inputs(&args.plan)?;
    let target = validate_target(args.target_corpus)?;
    let response = build_goal_response(&inputs, target, args.basis.into())
        .map_err(|e| e.to_string())?;

    match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)
            .map_err(|e| format!("failed to serialize goal: {e}")),
        OutputFormat::Table => Ok(render_goal_report(&response, &args.currency)),
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .route("/api/goal", get(goal_get_handler).post(goal_post_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(host: IpAddr, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::new(host, port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "SIP HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn projection_get_handler(payload: Result<Query<SipPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => projection_handler_impl(payload),
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn projection_post_handler(payload: Result<Json<SipPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => projection_handler_impl(payload),
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn goal_get_handler(payload: Result<Query<SipPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => goal_handler_impl(payload),
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn goal_post_handler(payload: Result<Json<SipPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => goal_handler_impl(payload),
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

fn rejection_response(msg: &str) -> Response {
    tracing::warn!(error = %msg, "malformed request payload");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn projection_handler_impl(payload: SipPayload) -> Response {
    let request = match projection_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            tracing::warn!(error = %msg, "rejected projection request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match build_projection_response(&request.inputs, request.series) {
        Ok(response) => {
            tracing::debug!(
                years = request.inputs.years,
                future_value = response.projection.future_value,
                "served projection"
            );
            json_response(StatusCode::OK, response)
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

fn goal_handler_impl(payload: SipPayload) -> Response {
    let request = match goal_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            tracing::warn!(error = %msg, "rejected goal request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match build_goal_response(&request.inputs, request.target, request.basis) {
        Ok(response) => {
            tracing::debug!(
                target_corpus = request.target,
                feasible = response.feasible,
                "served goal"
            );
            json_response(StatusCode::OK, response)
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn payload_from_json(json: &str) -> Result<SipPayload, String> {
    serde_json::from_str::<SipPayload>(json).map_err(|e| format!("Invalid API JSON payload: {e}"))
}

fn plan_from_payload(payload: &SipPayload) -> PlanArgs {
    let mut plan = default_plan_args();

    if let Some(v) = payload.sip_amount {
        plan.sip_amount = v;
    }
    if let Some(v) = payload.annual_return {
        plan.annual_return = v;
    }
    if let Some(v) = payload.years {
        plan.years = v;
    }
    if let Some(v) = payload.lump_sum {
        plan.lump_sum = v;
    }
    if let Some(v) = payload.step_up {
        plan.step_up = v;
    }
    if let Some(v) = payload.inflation_rate {
        plan.inflation_rate = v;
    }

    plan
}

fn projection_request_from_payload(payload: SipPayload) -> Result<ProjectionRequest, String> {
    let inputs = build_inputs(&plan_from_payload(&payload))?;
    let series = payload
        .growth_series
        .map(GrowthSeries::from)
        .unwrap_or_default();
    Ok(ProjectionRequest { inputs, series })
}

fn goal_request_from_payload(payload: SipPayload) -> Result<GoalRequest, String> {
    let inputs = build_inputs(&plan_from_payload(&payload))?;
    let target = payload
        .target_corpus
        .ok_or_else(|| "targetCorpus is required".to_string())?;
    let target = validate_target(target)?;
    let basis = payload.basis.map(GoalBasis::from).unwrap_or_default();
    Ok(GoalRequest {
        inputs,
        target,
        basis,
    })
}

fn validate_target(target: f64) -> Result<f64, String> {
    if !target.is_finite() || target <= 0.0 {
        return Err("targetCorpus must be a positive number".to_string());
    }
    Ok(target)
}

fn default_plan_args() -> PlanArgs {
    let defaults = SipInputs::default();
    PlanArgs {
        sip_amount: defaults.sip_amount,
        annual_return: defaults.annual_return,
        years: defaults.years,
        lump_sum: defaults.lump_sum,
        step_up: defaults.step_up,
        inflation_rate: defaults.inflation_rate,
    }
}

fn build_projection_response(
    inputs: &SipInputs,
    series: GrowthSeries,
) -> Result<ProjectionResponse, SipError> {
    let projection = project(inputs)?;
    let chart = chart_data(inputs, &projection, series)?;
    let yearly = yearly_trajectory(inputs)?;

    Ok(ProjectionResponse {
        inputs: *inputs,
        growth_series: series.into(),
        projection,
        chart,
        yearly,
    })
}

fn build_goal_response(
    inputs: &SipInputs,
    target: f64,
    basis: GoalBasis,
) -> Result<GoalResponse, SipError> {
    let goal = solve_required_sip(inputs, target, basis)?;
    let projection = match goal.required_sip {
        Some(sip_amount) => Some(project(&SipInputs {
            sip_amount,
            ..*inputs
        })?),
        None => None,
    };

    Ok(GoalResponse {
        inputs: *inputs,
        target_corpus: goal.target,
        basis: goal.basis.into(),
        required_sip: goal.required_sip,
        unit_future_value: goal.unit_future_value,
        lump_sum_contribution: goal.lump_sum_contribution,
        feasible: goal.feasible,
        message: goal.message,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use clap::Parser;
    use tower::ServiceExt;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[derive(Parser, Debug)]
    struct ProjectCli {
        #[command(flatten)]
        args: ProjectArgs,
    }

    #[derive(Parser, Debug)]
    struct GoalCli {
        #[command(flatten)]
        args: GoalArgs,
    }

    #[test]
    fn empty_payload_uses_calculator_defaults() {
        let payload = payload_from_json("{}").expect("json should parse");
        let request = projection_request_from_payload(payload).expect("valid request");

        assert_eq!(request.inputs, SipInputs::default());
        assert_eq!(request.series, GrowthSeries::Trajectory);
    }

    #[test]
    fn payload_parses_web_keys() {
        let json = r#"{
          "sipAmount": 7500,
          "annualReturn": 11.5,
          "years": 15,
          "lumpSum": 250000,
          "stepUp": 10,
          "inflationRate": 6,
          "growthSeries": "divided"
        }"#;
        let payload = payload_from_json(json).expect("json should parse");
        let request = projection_request_from_payload(payload).expect("valid request");
        let inputs = request.inputs;

        assert_approx(inputs.sip_amount, 7_500.0);
        assert_approx(inputs.annual_return, 11.5);
        assert_eq!(inputs.years, 15);
        assert_approx(inputs.lump_sum, 250_000.0);
        assert_approx(inputs.step_up, 10.0);
        assert_approx(inputs.inflation_rate, 6.0);
        assert_eq!(request.series, GrowthSeries::Divided);
    }

    #[test]
    fn payload_rejects_horizon_above_cap() {
        let payload = payload_from_json(r#"{"years": 201}"#).expect("json should parse");
        let err = projection_request_from_payload(payload).expect_err("must reject long horizon");
        assert!(err.contains("--years"));
    }

    #[test]
    fn build_inputs_rejects_non_finite_values() {
        let mut plan = default_plan_args();
        plan.step_up = f64::NAN;
        let err = build_inputs(&plan).expect_err("must reject NaN");
        assert!(err.contains("stepUp"));
    }

    #[test]
    fn goal_payload_requires_target() {
        let payload = payload_from_json(r#"{"sipAmount": 1000}"#).expect("json should parse");
        let err = goal_request_from_payload(payload).expect_err("target is required");
        assert!(err.contains("targetCorpus"));
    }

    #[test]
    fn goal_payload_parses_basis_aliases() {
        for basis in ["inflation-adjusted", "inflationAdjusted", "real"] {
            let json = format!(r#"{{"targetCorpus": 1000000, "basis": "{basis}"}}"#);
            let payload = payload_from_json(&json).expect("json should parse");
            let request = goal_request_from_payload(payload).expect("valid request");
            assert_eq!(request.basis, GoalBasis::InflationAdjusted);
            assert_approx(request.target, 1_000_000.0);
        }
    }

    #[test]
    fn projection_response_serialization_contains_expected_fields() {
        let response = build_projection_response(&SipInputs::default(), GrowthSeries::Divided)
            .expect("valid inputs");
        let json = serde_json::to_string(&response).expect("response should serialize");

        assert!(json.contains("\"futureValue\""));
        assert!(json.contains("\"lumpSumFuture\""));
        assert!(json.contains("\"adjustedFutureValue\""));
        assert!(json.contains("\"totalInvested\""));
        assert!(json.contains("\"totalInterest\""));
        assert!(json.contains("\"growthSeries\":\"divided\""));
        assert!(json.contains("\"breakdown\""));
        assert!(json.contains("\"sipAmount\""));
        assert_eq!(response.chart.labels.len(), 10);
        assert_eq!(response.yearly.len(), 10);
    }

    #[test]
    fn goal_response_includes_projection_at_required_contribution() {
        let response = build_goal_response(&SipInputs::default(), 1_000_000.0, GoalBasis::Nominal)
            .expect("valid inputs");
        assert!(response.feasible);

        let projection = response.projection.expect("feasible goal is projected");
        assert!((projection.future_value - 1_000_000.0).abs() <= 1e-3);
    }

    #[test]
    fn project_cli_accepts_negative_rates() {
        let cli = ProjectCli::try_parse_from([
            "sip",
            "--annual-return",
            "-4",
            "--years",
            "3",
            "--format",
            "json",
        ])
        .expect("cli should parse");
        assert_approx(cli.args.plan.annual_return, -4.0);
        assert_eq!(cli.args.plan.years, 3);
        assert_eq!(cli.args.format, OutputFormat::Json);
        assert_eq!(cli.args.growth_series, CliGrowthSeries::Trajectory);

        let output = run_project_command(&cli.args).expect("valid command");
        assert!(output.contains("\"futureValue\""));
    }

    #[test]
    fn project_command_renders_table() {
        let cli = ProjectCli::try_parse_from(["sip"]).expect("cli should parse");
        let output = run_project_command(&cli.args).expect("valid command");

        assert!(output.contains("Future Value"));
        assert!(output.contains("₹1161695.38"));
        assert!(output.contains("₹600000.00"));
    }

    #[test]
    fn goal_cli_requires_target_corpus() {
        assert!(GoalCli::try_parse_from(["sip"]).is_err());

        let cli = GoalCli::try_parse_from([
            "sip",
            "--target-corpus",
            "1161695.381759702",
            "--currency",
            "$",
        ])
        .expect("cli should parse");
        let output = run_goal_command(&cli.args).expect("valid command");
        assert!(output.contains("$5000.00"));
    }

    #[test]
    fn goal_command_rejects_non_positive_target() {
        let cli = GoalCli::try_parse_from(["sip", "--target-corpus", "0"])
            .expect("cli should parse");
        let err = run_goal_command(&cli.args).expect_err("zero target must be rejected");
        assert!(err.contains("targetCorpus"));
    }

    async fn send(request: Request<Body>) -> Response {
        router()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    fn post_request(uri: &str, json: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json))
            .expect("valid request")
    }

    fn header_value(response: &Response, name: header::HeaderName) -> Option<String> {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    fn assert_json_no_store(response: &Response) {
        assert_eq!(
            header_value(response, header::CACHE_CONTROL).as_deref(),
            Some("no-store")
        );
        let content_type = header_value(response, header::CONTENT_TYPE).unwrap_or_default();
        assert!(
            content_type.starts_with("application/json"),
            "unexpected content type {content_type}"
        );
    }

    #[tokio::test]
    async fn router_serves_projection_with_no_store() {
        let response = send(get_request("/api/projection?sipAmount=1000&years=2&annualReturn=0")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_json_no_store(&response);

        let body = body_json(response).await;
        assert_eq!(body["totalInvested"].as_f64(), Some(24_000.0));
        assert_eq!(body["chart"]["labels"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn router_solves_posted_goal() {
        let response = send(post_request(
            "/api/goal",
            r#"{"targetCorpus": 1000000, "basis": "nominal"}"#,
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_json_no_store(&response);

        let body = body_json(response).await;
        assert_eq!(body["feasible"].as_bool(), Some(true));
        assert!(body["requiredSip"].as_f64().is_some_and(|v| v > 0.0));
    }

    #[tokio::test]
    async fn router_returns_json_error_for_malformed_query() {
        let response = send(get_request("/api/projection?years=2.5")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_json_no_store(&response);

        let body = body_json(response).await;
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|msg| msg.contains("deserialize"))
        );
    }

    #[tokio::test]
    async fn router_returns_json_error_for_malformed_body() {
        let response = send(post_request("/api/goal", "{not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_json_no_store(&response);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn router_rejects_invalid_goal_with_json_error() {
        let response = send(get_request("/api/goal?targetCorpus=-5")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_json_no_store(&response);
        assert_eq!(
            body_json(response).await["error"].as_str(),
            Some("targetCorpus must be a positive number")
        );
    }

    #[tokio::test]
    async fn router_falls_back_to_json_not_found() {
        let response = send(get_request("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_json_no_store(&response);
        assert_eq!(body_json(response).await["error"].as_str(), Some("Not found"));
    }

    #[tokio::test]
    async fn router_serves_static_assets() {
        for (uri, content_type) in [
            ("/", "text/html"),
            ("/index.html", "text/html"),
            ("/styles.css", "text/css"),
            ("/app.js", "application/javascript"),
        ] {
            let response = send(get_request(uri)).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(
                header_value(&response, header::CACHE_CONTROL).as_deref(),
                Some("no-store")
            );
            let actual = header_value(&response, header::CONTENT_TYPE).unwrap_or_default();
            assert!(actual.starts_with(content_type), "{uri}: {actual}");
        }
    }
}
