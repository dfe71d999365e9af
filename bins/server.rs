//! `server`: the todo HTTP API.

use std::process::ExitCode;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use tracing::{error, info};
use uuid::Uuid;

fn runtime(cfg: &AppConfig) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // 配置不可用时仍用默认格式记录原因
            init_logging(LogFormat::default());
            error!(event = "config_invalid", error = %e, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(cfg.logging.format.parse().unwrap_or_default());

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(event = "panic", %instance, message = %info, "todo api panicked");
    }));

    let rt = match runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "cannot start tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "todo api starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(event = "stop", %instance, "todo api stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "run_failed", %instance, error = %e, "todo api exited with error");
            ExitCode::FAILURE
        }
    }
}
