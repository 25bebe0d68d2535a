use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use listing_screen::config::{AppConfig, ScreeningSettings};
use listing_screen::error::AppError;
use listing_screen::telemetry;
use listing_screen::workflows::screening::{
    default_file_name, screening_router, RegionWageTable, RulesetVersion, ScreeningReport,
    ScreeningService, ScreeningWorkbookWriter, Verdict, WageTableStore,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "listing-screen",
    about = "Screen job-listing exports against the editorial rulebook before publication",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screen a listing export and write the decision workbook
    Screen(ScreenArgs),
    /// Inspect or edit the saved minimum-wage table
    Wages {
        #[command(subcommand)]
        command: WagesCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Listing export (.csv, .tsv, .txt, .xlsx, .xlsm, .xls, .ods)
    input: PathBuf,
    /// Workbook to write (defaults to a timestamped file in the output directory)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Directory for the timestamped workbook
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Rulebook generation: current or initial
    #[arg(long, value_parser = parse_ruleset)]
    ruleset: Option<RulesetVersion>,
    #[command(flatten)]
    table: WageTableArgs,
}

#[derive(Args, Debug, Default)]
struct WageTableArgs {
    /// Override the saved wage table location
    #[arg(long)]
    wage_table: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum WagesCommand {
    /// Print the effective minimum wage per region
    Show(WageTableArgs),
    /// Apply region=value edits (e.g. 東京=1230) and save them
    Set(WageSetArgs),
    /// Save the built-in defaults over any edits
    Reset(WageTableArgs),
}

#[derive(Args, Debug)]
struct WageSetArgs {
    /// One or more region=value edits
    #[arg(required = true)]
    edits: Vec<String>,
    #[command(flatten)]
    table: WageTableArgs,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Screen(args) => run_screen(args),
        Command::Wages { command } => run_wages(command),
    }
}

fn parse_ruleset(raw: &str) -> Result<RulesetVersion, String> {
    raw.parse::<RulesetVersion>().map_err(|err| err.to_string())
}

fn screening_service(settings: &ScreeningSettings, table: &WageTableArgs) -> ScreeningService {
    let path = table
        .wage_table
        .clone()
        .unwrap_or_else(|| settings.wage_table_path.clone());
    ScreeningService::new(WageTableStore::new(path), settings.ruleset)
}

fn build_app(state: AppState, service: Arc<ScreeningService>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(screening_router(service))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };
    let service = Arc::new(screening_service(
        &config.screening,
        &WageTableArgs::default(),
    ));

    let app = build_app(state, service).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        ruleset = %config.screening.ruleset,
        "listing screener ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = screening_service(&config.screening, &args.table);
    let report = service.screen_path(&args.input, args.ruleset)?;

    let output = resolve_output_path(
        args.output,
        args.output_dir
            .as_deref()
            .unwrap_or(&config.screening.output_dir),
        &default_file_name(&Local::now()),
    );
    let written = ScreeningWorkbookWriter::new(&report).write(&output)?;

    render_screening_report(&args.input, &report, &written);
    Ok(())
}

fn resolve_output_path(output: Option<PathBuf>, output_dir: &Path, file_name: &str) -> PathBuf {
    output.unwrap_or_else(|| output_dir.join(file_name))
}

fn run_wages(command: WagesCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        WagesCommand::Show(table) => {
            let service = screening_service(&config.screening, &table);
            render_wage_table(service.store().path(), &service.wage_table());
        }
        WagesCommand::Set(args) => {
            let service = screening_service(&config.screening, &args.table);
            let table = service.update_wages(&args.edits)?;
            println!("Saved {} edit(s).", args.edits.len());
            render_wage_table(service.store().path(), &table);
        }
        WagesCommand::Reset(table) => {
            let service = screening_service(&config.screening, &table);
            let defaults = service.reset_wages()?;
            println!("Restored default minimum wages.");
            render_wage_table(service.store().path(), &defaults);
        }
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_screening_report(input: &Path, report: &ScreeningReport, written: &Path) {
    let summary = report.summary();

    println!("Listing screening");
    println!("Input: {}", input.display());
    println!("Ruleset: {}", summary.ruleset_label);
    println!("Listings screened: {}", summary.total);

    println!("\nVerdicts");
    for entry in &summary.counts {
        println!("- {}: {}", entry.verdict_label, entry.count);
    }

    for verdict in [Verdict::Reject, Verdict::NeedsReview] {
        let outcomes: Vec<_> = summary
            .outcomes
            .iter()
            .filter(|outcome| outcome.verdict == verdict)
            .collect();

        if outcomes.is_empty() {
            println!("\n{}: none", verdict.label());
            continue;
        }

        println!("\n{}", verdict.label());
        for outcome in outcomes {
            println!("- row {}: {}", outcome.row_number, outcome.reason);
        }
    }

    println!("\nWorkbook written to {}", written.display());
}

fn render_wage_table(path: &Path, table: &RegionWageTable) {
    println!("Minimum wages ({})", path.display());
    for (region, wage) in table.entries() {
        println!("- {region}: {wage}");
    }
}
