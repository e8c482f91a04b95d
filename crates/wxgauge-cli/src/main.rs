use std::fs;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::metadata::LevelFilter;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use wxgauge_core::{
    DEFAULT_UDP_PORT, DispatchError, MAX_PAYLOAD_LEN, MessageKind, StationSnapshot, UnitSystem,
    WeatherStation,
};

/// Station clock drift (seconds) past which the listener warns.
const CLOCK_SKEW_THRESHOLD_S: i64 = 10;

#[derive(Parser, Debug)]
#[command(name = "wxgauge")]
#[command(version)]
#[command(
    about = "Decoder for weather hub UDP broadcasts (wind, air, sky, Tempest, status).",
    long_about = None,
    after_help = "Examples:\n  wxgauge decode capture.jsonl -o snapshot.json\n  wxgauge --units metric decode capture.jsonl --stdout --pretty\n  wxgauge listen --port 50222"
)]
struct Cli {
    /// Display unit system for converted readings
    #[arg(long, global = true, env = "WXGAUGE_UNITS", default_value = "imperial")]
    units: UnitSystem,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay captured payloads (one JSON message per line) and write a snapshot report.
    Decode {
        /// Path to a file of captured payloads
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Listen for hub broadcasts and log converted readings.
    Listen {
        /// Local address to bind
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        bind: IpAddr,

        /// UDP port the hub broadcasts on
        #[arg(long, default_value_t = DEFAULT_UDP_PORT)]
        port: u16,

        /// Stop after this many datagrams
        #[arg(long)]
        count: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(cli.command, Commands::Decode { quiet: true, .. });
    init_logging(quiet);

    let result = match cli.command {
        Commands::Decode {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet,
        } => cmd_decode(cli.units, input, report, stdout, pretty, compact, quiet),
        Commands::Listen { bind, port, count } => cmd_listen(cli.units, bind, port, count),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(quiet: bool) {
    let default = if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

/// Result of replaying a payload file.
#[derive(Debug, Serialize)]
struct DecodeReport {
    input: String,
    payloads_total: u64,
    updated: u64,
    /// Known message kinds whose payload failed to decode.
    rejected: u64,
    /// Malformed payloads and unknown message types.
    ignored: u64,
    snapshot: StationSnapshot,
}

fn cmd_decode(
    units: UnitSystem,
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
) -> Result<(), CliError> {
    validate_input_file(&input)?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };
    if let Some(report_path) = report.as_ref() {
        if same_file(report_path, &input) {
            return Err(CliError::new(
                format!(
                    "report path must differ from input: {}",
                    report_path.display()
                ),
                Some("choose a different output path".to_string()),
            ));
        }
    }

    let text = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let rep = replay(units, &input, &text);
    info!(
        payloads = rep.payloads_total,
        updated = rep.updated,
        rejected = rep.rejected,
        ignored = rep.ignored,
        "replay finished"
    );
    let json = serialize_report(&rep, pretty, compact)?;

    let Some(report) = report else {
        print!("{}", json);
        return Ok(());
    };
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;
    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn replay(units: UnitSystem, input: &Path, text: &str) -> DecodeReport {
    let mut station = WeatherStation::new(units);
    let mut rep = DecodeReport {
        input: input.display().to_string(),
        payloads_total: 0,
        updated: 0,
        rejected: 0,
        ignored: 0,
        snapshot: station.snapshot(),
    };

    for (index, line) in text.lines().enumerate() {
        let payload = line.trim();
        if payload.is_empty() {
            continue;
        }
        rep.payloads_total += 1;
        match station.decode_message(payload) {
            Ok(_) => rep.updated += 1,
            Err(DispatchError::Decode { kind, source }) => {
                debug!(line = index + 1, %kind, error = %source, "payload rejected");
                rep.rejected += 1;
            }
            Err(err) => {
                debug!(line = index + 1, error = %err, "payload ignored");
                rep.ignored += 1;
            }
        }
    }

    rep.snapshot = station.snapshot();
    rep
}

fn serialize_report(rep: &DecodeReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a file of captured payloads, one JSON message per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a file of captured payloads, one JSON message per line".to_string()),
        ));
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn cmd_listen(
    units: UnitSystem,
    bind: IpAddr,
    port: u16,
    count: Option<u64>,
) -> Result<(), CliError> {
    let socket = UdpSocket::bind((bind, port)).map_err(|err| {
        CliError::new(
            format!("failed to bind {bind}:{port}: {err}"),
            Some("check that no other listener owns the port".to_string()),
        )
    })?;
    info!(%bind, port, %units, "listening for hub broadcasts");

    let mut station = WeatherStation::new(units);
    let mut buf = [0u8; MAX_PAYLOAD_LEN];
    let mut received = 0u64;
    while count.is_none_or(|limit| received < limit) {
        let (len, peer) = socket
            .recv_from(&mut buf)
            .context("UDP receive failed")?;
        received += 1;
        match station.decode_datagram(&buf[..len]) {
            Ok(kind) => {
                debug!(%peer, %kind, len, "datagram decoded");
                log_readings(&station, kind);
            }
            Err(err) => debug!(%peer, len, error = %err, "datagram skipped"),
        }
    }
    Ok(())
}

fn log_readings(station: &WeatherStation, kind: MessageKind) {
    let units = station.units();
    match kind {
        MessageKind::RapidWind => {
            let wind = station.rapid_wind();
            info!(
                speed = wind.wind_speed(),
                unit = units.speed_label(),
                direction = wind.wind_direction(),
                "rapid wind"
            );
            check_clock_skew(wind.epoch_time());
        }
        MessageKind::ObservationTempest => {
            let obs = station.observation_tempest();
            info!(
                temperature = obs.air_temperature(),
                unit = units.temperature_label(),
                pressure = obs.station_pressure(),
                humidity = obs.relative_humidity(),
                wind_avg = obs.wind_average(),
                "tempest observation"
            );
        }
        MessageKind::ObservationAir => {
            let obs = station.observation_air();
            info!(
                temperature = obs.air_temperature(),
                unit = units.temperature_label(),
                pressure = obs.station_pressure(),
                humidity = obs.relative_humidity(),
                "air observation"
            );
        }
        MessageKind::ObservationSky => {
            let obs = station.observation_sky();
            info!(
                wind_avg = obs.wind_average(),
                unit = units.speed_label(),
                illuminance = obs.illuminance(),
                uv = obs.uv(),
                "sky observation"
            );
        }
        MessageKind::LightningStrike => {
            let strike = station.lightning_strike();
            info!(
                distance = strike.distance(),
                unit = units.distance_label(),
                energy = strike.energy(),
                "lightning strike"
            );
        }
        MessageKind::RainStart => {
            let at = station.rain_start().observed_at_rfc3339();
            info!(at = at.as_deref().unwrap_or("unknown"), "rain started");
        }
        MessageKind::DeviceStatus => {
            let status = station.device_status();
            let sensors = status.sensor_status();
            if sensors.is_ok() {
                info!(voltage = status.voltage(), rssi = status.rssi(), "device status");
            } else {
                warn!(
                    voltage = status.voltage(),
                    sensor_status = %format!("{:#x}", sensors.bits()),
                    "device reports sensor failures"
                );
            }
        }
        MessageKind::HubStatus => {
            let hub = station.hub_status();
            info!(
                hub = hub.hub_serial().unwrap_or("unknown"),
                uptime = hub.uptime(),
                rssi = hub.rssi(),
                "hub status"
            );
        }
    }
}

fn check_clock_skew(epoch: u64) {
    let Ok(epoch) = i64::try_from(epoch) else {
        return;
    };
    let skew = OffsetDateTime::now_utc().unix_timestamp() - epoch;
    if skew.abs() > CLOCK_SKEW_THRESHOLD_S {
        warn!(skew_s = skew, "station clock differs from local clock");
    }
}
