//! flightlens: CLI + JSON API for flight status, aircraft identity and
//! destination weather.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};

use flightlens_core::config::{self, Config};
use flightlens_core::gazetteer;
use flightlens_core::specs::SpecTable;
use flightlens_core::trip::TripQuery;
use flightlens_core::weather::WeatherReport;

mod logging;
mod lookup;
mod sources;
mod web;

use lookup::{FlightReport, ItineraryReport, Lookup};
use sources::{AviationStackClient, OpenSkyClient, OpenWeatherClient};

#[derive(Parser)]
#[command(name = "flightlens", version, about = "Flight status, aircraft and weather lookup")]
struct Cli {
    /// Config file (defaults to ~/.flightlens/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// AviationStack API key
    #[arg(long, global = true, env = "AVIATION_STACK_API_KEY", hide_env_values = true)]
    aviationstack_key: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, global = true, env = "OPENWEATHERMAP_API_KEY", hide_env_values = true)]
    openweathermap_key: Option<String>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more flights (comma separated, e.g. "BA117,BA332")
    Flight {
        numbers: String,

        /// Print the JSON report instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show the forecast for an airport
    Weather {
        /// 3-letter airport code
        iata: String,

        /// Timezone label to show alongside local time
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },

    /// Validate a trip and preview the likely aircraft
    Trip {
        #[arg(long)]
        origin: String,

        #[arg(long)]
        destination: String,

        /// Departure date, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Return date, YYYY-MM-DD
        #[arg(long)]
        return_date: Option<String>,

        #[arg(long)]
        airline: Option<String>,
    },

    /// Start the JSON API server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::config_file);
    let mut config = config::load_config_from(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", config_path.display());
        std::process::exit(1);
    });
    if cli.aviationstack_key.is_some() {
        config.api.aviationstack_key = cli.aviationstack_key.clone();
    }
    if cli.openweathermap_key.is_some() {
        config.api.openweathermap_key = cli.openweathermap_key.clone();
    }

    match cli.command {
        Commands::Flight { numbers, json } => cmd_flight(&config, &numbers, json).await,
        Commands::Weather { iata, timezone } => cmd_weather(&config, &iata, &timezone).await,
        Commands::Trip {
            origin,
            destination,
            date,
            return_date,
            airline,
        } => cmd_trip(TripQuery {
            origin,
            destination,
            date,
            return_date,
            airline,
        }),
        Commands::Serve { host, port } => cmd_serve(&config, host, port).await,
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => cmd_config_init(&config_path, force),
            ConfigAction::Show => cmd_config_show(config),
        },
    }
}

fn build_lookup(config: &Config) -> Lookup {
    let http = sources::http_client().unwrap_or_else(|e| {
        eprintln!("Error building HTTP client: {e}");
        std::process::exit(1);
    });

    let specs_path = config.specs_path.as_deref().map(Path::new);
    let specs = SpecTable::load_or_builtin(specs_path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to built-in aircraft specs");
        SpecTable::builtin()
    });
    tracing::debug!(types = specs.len(), "aircraft specs loaded");

    Lookup {
        flights: Arc::new(AviationStackClient::new(
            http.clone(),
            config.endpoints.aviationstack_url.clone(),
            config.api.aviationstack_key.clone(),
        )),
        live: Arc::new(OpenSkyClient::new(
            http.clone(),
            config.endpoints.opensky_url.clone(),
        )),
        weather: Arc::new(OpenWeatherClient::new(
            http,
            config.endpoints.openweathermap_url.clone(),
            config.api.openweathermap_key.clone(),
        )),
        specs,
        live_timeout: Duration::from_secs(config.lookup.live_timeout_secs),
    }
}

async fn cmd_flight(config: &Config, numbers: &str, json: bool) {
    let lookup = build_lookup(config);
    let report = lookup.itinerary(numbers, Utc::now()).await.unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("Error encoding report: {e}"),
        }
        return;
    }

    print_itinerary(&report);
}

fn print_itinerary(report: &ItineraryReport) {
    for outcome in &report.flights {
        println!();
        match (&outcome.report, &outcome.error) {
            (Some(flight), _) => print_flight(flight),
            (None, Some(err)) => println!("{}: {err}", outcome.flight_number),
            (None, None) => println!("{}: no result", outcome.flight_number),
        }
    }

    if let Some(c) = report.connection {
        println!();
        let flag = if c.is_short { "  (short connection)" } else { "" };
        println!("Connection: {}h {}m{flag}", c.hours, c.minutes);
    }
    println!();
}

fn print_flight(report: &FlightReport) {
    let f = &report.flight;
    println!("{} — {} ({})", f.flight_number, f.airline, f.status);

    let mut table = Table::new();
    table.set_header(vec!["", "Airport", "Code", "Scheduled (UTC)", "Terminal", "Gate"]);
    for (label, end) in [("Departure", &f.departure), ("Arrival", &f.arrival)] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(&end.airport),
            Cell::new(&end.iata),
            Cell::new(end.scheduled.format("%Y-%m-%d %H:%M")),
            Cell::new(end.terminal.as_deref().unwrap_or("-")),
            Cell::new(end.gate.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
    println!("  Duration: {}   Progress: {:.0}%", report.duration, report.progress);

    let aircraft = &report.aircraft;
    let mut table = Table::new();
    table.set_header(vec!["Source", "Type", "Registration", "Confidence", "Model", "Range (mi)"]);
    let estimated = if aircraft.is_estimated() { " (estimated)" } else { "" };
    table.add_row(vec![
        Cell::new(format!("{}{estimated}", aircraft.source())),
        Cell::new(aircraft.iata_type().unwrap_or("-")),
        Cell::new(aircraft.registration().unwrap_or("-")),
        Cell::new(
            aircraft
                .confidence()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".into()),
        ),
        Cell::new(report.specs.as_ref().map(|s| s.model.as_str()).unwrap_or("-")),
        Cell::new(
            report
                .specs
                .as_ref()
                .map(|s| s.range_mi.to_string())
                .unwrap_or_else(|| "-".into()),
        ),
    ]);
    println!("{table}");

    if let Some(weather) = &report.weather {
        print_weather(weather);
    }
}

fn print_weather(report: &WeatherReport) {
    println!(
        "  Weather in {}: local time {} ({})",
        report.location, report.local_time, report.timezone
    );
    let mut table = Table::new();
    table.set_header(vec!["Date", "Temp (°F)", "Conditions"]);
    for day in &report.forecast {
        table.add_row(vec![
            Cell::new(&day.date),
            Cell::new(day.temp),
            Cell::new(&day.description),
        ]);
    }
    println!("{table}");
}

async fn cmd_weather(config: &Config, iata: &str, timezone: &str) {
    let lookup = build_lookup(config);
    let code = iata.trim().to_ascii_uppercase();
    match lookup.weather(&code, timezone).await {
        Ok(report) => {
            println!();
            print_weather(&report);
            println!();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_trip(query: TripQuery) {
    let query = query.normalized();
    let today = Utc::now().date_naive();
    let errors = query.validate(today);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("  {}: {}", e.field, e.message);
        }
        std::process::exit(1);
    }

    let preview = query.plan(today).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    println!();
    println!("Trip: {} → {} on {}", preview.origin, preview.destination, preview.date);
    if let Some(ret) = preview.return_date {
        println!("  Return:     {ret}");
    }
    match (preview.distance_mi, preview.band) {
        (Some(mi), Some(band)) => println!("  Distance:   {mi} mi ({band:?})"),
        _ => println!("  Distance:   unknown route"),
    }
    match &preview.suggestion {
        Some(s) => println!(
            "  Aircraft:   {} {} ({} confidence, {})",
            s.iata, s.model, s.confidence, s.reason
        ),
        None => println!("  Aircraft:   no estimate"),
    }
    match preview.forecast_location {
        Some(city) => println!("  Forecast:   {city}"),
        None => println!(
            "  Forecast:   {} not in airport list ({} known)",
            preview.destination,
            gazetteer::known_airports().count()
        ),
    }
    println!();
}

async fn cmd_serve(config: &Config, host: Option<String>, port: Option<u16>) {
    let host = host.unwrap_or_else(|| config.dashboard.host.clone());
    let port = port.unwrap_or(config.dashboard.port);
    if config.api.aviationstack_key.is_none() {
        tracing::warn!("no AviationStack key configured; flight lookups will fail");
    }

    let lookup = build_lookup(config);
    if let Err(e) = web::serve(lookup, &host, port).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}

fn cmd_config_init(path: &Path, force: bool) {
    if path.exists() && !force {
        eprintln!("{} already exists (use --force to overwrite)", path.display());
        std::process::exit(1);
    }
    match config::save_config_to(&Config::default(), path) {
        Ok(()) => println!("Wrote {}", path.display()),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_config_show(mut config: Config) {
    for key in [
        &mut config.api.aviationstack_key,
        &mut config.api.openweathermap_key,
    ] {
        if key.is_some() {
            *key = Some("********".into());
        }
    }
    print!("{}", config::serialize_config(&config));
}
