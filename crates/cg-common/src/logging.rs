use std::panic;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Directory for rotated log files; unset means log to stderr.
pub const LOG_DIR_ENV: &str = "CG_LOG_DIR";
/// When truthy, panics are also passed to the default hook (which prints a backtrace).
pub const LOG_BACKTRACE_ENV: &str = "CG_LOG_INCLUDE_BACKTRACE";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Route panics through `tracing` so they land in the same sink as other logs.
/// Installed at most once per process.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let default_hook = panic::take_hook();
        let include_backtrace = env_flag(LOG_BACKTRACE_ENV);

        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()));
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".into());

            tracing::error!(
                application = app_name,
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %message,
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn log_dir() -> Option<PathBuf> {
    std::env::var_os(LOG_DIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

fn rotating_file_writer(app_name: &'static str) -> Option<BoxMakeWriter> {
    let dir = log_dir()?;
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("failed to create {LOG_DIR_ENV} {}: {err}; logging to stderr", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Initialize the global subscriber.
///
/// Filtering follows `RUST_LOG` (default `info`). With `CG_LOG_DIR` set, logs
/// go to `<CG_LOG_DIR>/<app>.log` rotated daily; otherwise they go to stderr so
/// stdout stays free for command output. Repeated calls are no-ops.
pub fn init_tracing_subscriber(app_name: &'static str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    if let Some(writer) = rotating_file_writer(app_name) {
        let _ = builder.with_ansi(false).with_writer(writer).try_init();
    } else {
        let _ = builder.with_writer(std::io::stderr).try_init();
    }
}
