//! ox-menu entrypoint.
use anyhow::Result;
use clap::Parser;
use core_config::load_from;
use core_terminal::{CrosstermBackend, HeadlessBackend};
use ox_menu::{Args, parse_keys, run_session};
use std::path::Path;
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "ox-menu.log";

/// Log to a file next to the working directory; the terminal is in use.
fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; drop guard so writer shuts down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", headless = args.headless.is_some(), "startup");

    let config = load_from(args.config.clone())?;
    let outcome = match &args.headless {
        Some(keys) => {
            let mut backend = HeadlessBackend::new().with_keys(parse_keys(keys)?);
            run_session(&mut backend, &args, &config.file)?
        }
        None => {
            let mut backend = CrosstermBackend::new();
            let mut guard = backend.enter_guard()?;
            run_session(guard.backend(), &args, &config.file)?
        }
    };
    println!("{}", outcome.report());
    info!(target: "runtime", code = outcome.choice.code(), "shutdown");
    Ok(())
}
