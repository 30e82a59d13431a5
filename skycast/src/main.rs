//! skycast - terminal weather display
//!
//! ```sh
//! # API key from the environment, position from an IP lookup
//! OPENWEATHER_API_KEY=... skycast
//!
//! # Fixed position, imperial units, refresh every 10 minutes
//! skycast --lat 40.71 --lon -74.01 --units imperial --refresh-interval 600
//! ```

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skycast_core::{
    AppState, Config, Coordinates, FixedGeolocator, GeolocationMode, Geolocator, IpGeolocator,
    NoGeolocator, OpenWeatherClient, Overrides, UnitMode, WeatherController,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "skycast=info,skycast_core=info";

/// Terminal weather display backed by OpenWeatherMap
#[derive(Parser, Debug)]
#[command(name = "skycast", version)]
#[command(about = "Current conditions and a 7-day forecast in your terminal")]
struct Args {
    /// Config file (default: <config dir>/skycast/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// metric or imperial
    #[arg(long, short)]
    units: Option<UnitMode>,

    /// City shown when geolocation is unavailable
    #[arg(long, value_name = "NAME")]
    default_city: Option<String>,

    /// Fixed latitude instead of an IP lookup
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Fixed longitude instead of an IP lookup
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Skip geolocation and show the default city
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    no_geolocation: bool,

    /// Auto-refresh interval in seconds (0 disables)
    #[arg(long, short, value_name = "SECS")]
    refresh_interval: Option<u64>,

    /// Log file (default: <state dir>/skycast/skycast.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Result<Overrides> {
        let geolocation = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeolocationMode::Fixed(
                Coordinates::new(lat, lon).context("invalid --lat/--lon")?,
            )),
            _ if self.no_geolocation => Some(GeolocationMode::Off),
            _ => None,
        };
        Ok(Overrides {
            api_key: self.api_key.clone(),
            units: self.units,
            default_city: self.default_city.clone(),
            geolocation,
            refresh_interval_secs: self.refresh_interval,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Everything that can fail happens before the terminal is taken over
    let config = Config::load(args.config.as_deref(), args.overrides()?)
        .context("failed to load configuration")?;
    let log_path = init_tracing(args.log_file)?;
    info!(?config, log = %log_path.display(), "starting skycast");

    let api = Arc::new(OpenWeatherClient::new(config.openweather()).context("failed to build HTTP client")?);
    let geo: Arc<dyn Geolocator> = match config.geolocation {
        GeolocationMode::Ip => {
            Arc::new(IpGeolocator::new(config.timeout).context("failed to build geolocation client")?)
        }
        GeolocationMode::Fixed(coords) => Arc::new(FixedGeolocator(coords)),
        GeolocationMode::Off => Arc::new(NoGeolocator),
    };
    let mut controller =
        WeatherController::new(AppState::new(&config.default_city, config.units), api, geo);

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = skycast::runtime::run(&mut terminal, &mut controller, config.refresh_interval).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("terminal error")
}

/// Log to a file; the terminal belongs to the UI
fn init_tracing(log_file: Option<PathBuf>) -> Result<PathBuf> {
    let path = match log_file {
        Some(path) => path,
        None => dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .context("no state or data directory for the log file, pass --log-file")?
            .join("skycast")
            .join("skycast.log"),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}
