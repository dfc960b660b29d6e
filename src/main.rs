mod export;
mod ipc;
mod roster;

use anyhow::Context;
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing::{info, warn, Level};

fn init_logging() {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "rosterd ready");

    let mut state = ipc::AppState {
        roster: roster::Roster::new(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "stdin read failed, shutting down");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                // No id to echo back.
                warn!(error = %e, "bad request line");
                json!({
                    "id": null,
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                })
            }
        };

        writeln!(stdout, "{}", resp).context("failed to write response")?;
        stdout.flush().context("failed to flush response")?;
    }

    info!(students = state.roster.len(), "stdin closed, exiting");
    Ok(())
}
