use anyhow::Context;
use gradebookd::ipc;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // stdout carries responses, so logs go to stderr.
    let filter =
        EnvFilter::try_from_env("GRADEBOOKD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let mut state = ipc::AppState::new();
    info!(version = env!("CARGO_PKG_VERSION"), "gradebookd ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                warn!(error = %e, "undecodable request line");
                ipc::bad_json(e.to_string())
            }
        };

        writeln!(stdout, "{}", resp).context("write response")?;
        stdout.flush().context("flush response")?;
    }

    info!("stdin closed, exiting");
    Ok(())
}
