use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{Inputs, Projection, SeriesPoint, compute};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Compound savings projector (monthly compounding with recurring contributions)",
    after_help = "Run `nestegg serve [port]` to start the web widget instead."
)]
struct Cli {
    #[arg(long, default_value_t = 1000.0, help = "Starting principal")]
    initial_amount: f64,
    #[arg(
        long,
        default_value_t = 200.0,
        help = "Contribution added at the end of each month"
    )]
    monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Annual interest rate in percent, between 0 and 20"
    )]
    annual_rate: f64,
    #[arg(
        long,
        default_value_t = 10,
        help = "Projection horizon in years, between 1 and 40"
    )]
    years: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    initial_amount: Option<f64>,
    monthly_contribution: Option<f64>,
    #[serde(alias = "interestRate")]
    annual_rate_percent: Option<f64>,
    years: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    future_value: f64,
    total_deposits: f64,
    total_interest: f64,
    years: u32,
    total_months: u32,
    series: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<Inputs, String> {
    for (name, value) in [
        ("--initial-amount", cli.initial_amount),
        ("--monthly-contribution", cli.monthly_contribution),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be a finite value >= 0"));
        }
    }

    if !cli.annual_rate.is_finite() || !(0.0..=20.0).contains(&cli.annual_rate) {
        return Err("--annual-rate must be between 0 and 20".to_string());
    }

    if !(1..=40).contains(&cli.years) {
        return Err("--years must be between 1 and 40".to_string());
    }

    Ok(Inputs {
        initial_amount: cli.initial_amount,
        monthly_contribution: cli.monthly_contribution,
        annual_rate_percent: cli.annual_rate,
        years: cli.years,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        initial_amount: 1000.0,
        monthly_contribution: 200.0,
        annual_rate: 5.0,
        years: 10,
    }
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

fn inputs_from_payload(payload: ProjectPayload) -> Result<Inputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.initial_amount {
        cli.initial_amount = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_rate_percent {
        cli.annual_rate = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }

    build_inputs(cli)
}

fn build_project_response(inputs: &Inputs, projection: Projection) -> ProjectResponse {
    ProjectResponse {
        future_value: projection.future_value,
        total_deposits: projection.total_deposits,
        total_interest: projection.total_interest,
        years: inputs.years,
        total_months: inputs.years * 12,
        series: projection.series,
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Nest egg HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

/// One-shot projection on the command line: parse flags, validate, print the
/// summary and the sampled series.
pub fn run_projection_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let inputs = build_inputs(cli)?;
    let projection = compute(&inputs);
    print_projection(&inputs, &projection);
    Ok(())
}

fn print_projection(inputs: &Inputs, projection: &Projection) {
    println!(
        "Savings projection over {} years ({} months)",
        inputs.years,
        inputs.years * 12
    );
    println!(
        "  ${:.2} starting, ${:.2}/month, {:.2}% annual rate compounded monthly",
        inputs.initial_amount, inputs.monthly_contribution, inputs.annual_rate_percent
    );
    println!();
    println!("{:>6} {:>6} {:>14}", "Month", "Year", "Balance");
    for point in &projection.series {
        println!(
            "{:>6} {:>6.1} {:>14.0}",
            point.month,
            f64::from(point.month) / 12.0,
            point.balance
        );
    }
    println!();
    println!("Future value:    ${:.2}", projection.future_value);
    println!("Total deposits:  ${:.2}", projection.total_deposits);
    println!("Interest earned: ${:.2}", projection.total_interest);
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

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let projection = compute(&inputs);
    json_response(StatusCode::OK, build_project_response(&inputs, projection))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
