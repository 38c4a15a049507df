use std::backtrace::Backtrace;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};

use anyhow::{Context, Result, anyhow};
use bookwheel_core::time::{epoch_millis, now_utc};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str =
    "info,bookwheel_core=debug,bookwheel_app=debug,bookwheel_tui=debug,bookwheel_cli=debug";

static HOOK_ONCE: Once = Once::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Keeps the diagnostics log writer alive; dropping it flushes the log.
pub struct DiagnosticsSession {
    path: Option<PathBuf>,
    _guard: Option<WorkerGuard>,
}

impl DiagnosticsSession {
    pub fn initialize(enabled: bool) -> Result<Self> {
        install_panic_hook();
        if !enabled {
            return Ok(Self {
                path: None,
                _guard: None,
            });
        }

        let path = create_diagnostics_log_path()?;
        let guard = install_file_subscriber(&path)?;
        let _ = LOG_PATH.set(path.clone());

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            pid = std::process::id(),
            argv = ?std::env::args().collect::<Vec<String>>(),
            "bookwheel diagnostics start"
        );

        Ok(Self {
            path: Some(path),
            _guard: Some(guard),
        })
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

fn install_file_subscriber(path: &Path) -> Result<WorkerGuard> {
    let directory = path
        .parent()
        .ok_or_else(|| anyhow!("diagnostics log {} has no parent", path.display()))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("diagnostics log {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow!("{error}"))
        .context("failed to install diagnostics logger")?;

    Ok(guard)
}

fn install_panic_hook() {
    HOOK_ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|panic_info| {
            let payload = panic_payload(panic_info);
            let location = panic_info
                .location()
                .map(|value| format!("{}:{}:{}", value.file(), value.line(), value.column()))
                .unwrap_or_else(|| "unknown".to_string());
            let backtrace = Backtrace::force_capture();

            tracing::error!(
                payload = %payload,
                location = %location,
                backtrace = %backtrace,
                "panic captured"
            );

            eprintln!("Fatal internal error in bookwheel: {payload}");
            match LOG_PATH.get() {
                Some(path) => eprintln!("Diagnostics written to {}", path.display()),
                None => eprintln!("Run `bookwheel --diagnostics` to capture a diagnostics log."),
            }
        }));
    });
}

fn panic_payload(panic_info: &std::panic::PanicHookInfo<'_>) -> String {
    if let Some(payload) = panic_info.payload().downcast_ref::<&str>() {
        return (*payload).to_string();
    }
    if let Some(payload) = panic_info.payload().downcast_ref::<String>() {
        return payload.clone();
    }
    "unknown panic payload".to_string()
}

fn create_diagnostics_log_path() -> Result<PathBuf> {
    let config_path = bookwheel_core::config::resolve_config_path()
        .context("failed to resolve bookwheel config path for diagnostics")?;
    let config_dir = config_path.parent().ok_or_else(|| {
        anyhow!(
            "failed to resolve diagnostics directory from config path {}",
            config_path.display()
        )
    })?;

    let diagnostics_dir = config_dir.join("diagnostics");
    fs::create_dir_all(&diagnostics_dir).with_context(|| {
        format!(
            "failed to create diagnostics directory {}",
            diagnostics_dir.display()
        )
    })?;

    Ok(diagnostics_dir.join(log_file_name(epoch_millis(now_utc()))))
}

fn log_file_name(epoch_ms: i128) -> String {
    format!("{epoch_ms}.log")
}
