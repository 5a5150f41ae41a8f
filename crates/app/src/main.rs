use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, BackendConfig, Clock, DEFAULT_TEST_MINUTES, HttpExamBackend, SessionController,
};
use storage::repository::Storage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMinutes { raw: String },
    InvalidDbUrl { raw: String },
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMinutes { raw } => write!(f, "invalid --minutes value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn new_attempt(&self) -> Arc<SessionController> {
        self.services.new_attempt()
    }

    fn test_minutes(&self) -> u32 {
        self.services.test_minutes()
    }
}

#[derive(Debug)]
struct Args {
    backend: BackendConfig,
    db_url: String,
    minutes: u32,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--minutes <n>] [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", services::backend::DEFAULT_API_URL);
    eprintln!("  --minutes {DEFAULT_TEST_MINUTES}");
    eprintln!("  --db sqlite:reading.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  READING_API_URL, READING_TEST_MINUTES, READING_DB_URL, READING_HTTP_TIMEOUT_SECS");
    eprintln!("  RUST_LOG (default: info)");
}

fn parse_minutes(raw: String) -> Result<u32, ArgsError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ArgsError::InvalidMinutes { raw })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut backend = BackendConfig::from_env().map_err(|_| ArgsError::InvalidApiUrl {
            raw: std::env::var("READING_API_URL").unwrap_or_default(),
        })?;
        let mut db_url = std::env::var("READING_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("sqlite:reading.sqlite3".into()), normalize_sqlite_url);
        let mut minutes = match std::env::var("READING_TEST_MINUTES") {
            Ok(value) => parse_minutes(value)?,
            Err(_) => DEFAULT_TEST_MINUTES,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    let timeout = backend.request_timeout();
                    backend = BackendConfig::new(&value)
                        .map_err(|_| ArgsError::InvalidApiUrl { raw: value.clone() })?
                        .with_request_timeout(timeout);
                }
                "--minutes" => {
                    let value = require_value(args, "--minutes")?;
                    minutes = parse_minutes(value)?;
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            backend,
            db_url,
            minutes,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Keep SQLite setup in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    info!(
        api_url = %parsed.backend.base_url(),
        db_url = %parsed.db_url,
        minutes = parsed.minutes,
        "starting reading test client"
    );

    let backend = Arc::new(HttpExamBackend::new(parsed.backend)?);
    let services = AppServices::new(backend, &storage, Clock::system(), parsed.minutes);

    match services.recover_abandoned().await {
        Ok(Some(session_id)) => info!(%session_id, "cleared abandoned session"),
        Ok(None) => {}
        Err(err) => warn!(error = %err, "failed to recover abandoned session"),
    }

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("IELTS Reading Test")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "--api-url",
            "http://exam.local/api",
            "--minutes",
            "45",
            "--db",
            "sqlite::memory:",
        ])
        .unwrap();
        assert_eq!(args.backend.base_url().as_str(), "http://exam.local/api/");
        assert_eq!(args.minutes, 45);
        assert_eq!(args.db_url, "sqlite::memory:");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse(&["--minutes", "soon"]),
            Err(ArgsError::InvalidMinutes { .. })
        ));
        assert!(matches!(
            parse(&["--api-url", "not a url"]),
            Err(ArgsError::InvalidApiUrl { .. })
        ));
        assert!(matches!(
            parse(&["--db"]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:reading.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("reading.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}
