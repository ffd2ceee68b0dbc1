use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod model;
mod protocol;
mod services;
mod session;

use config::AppConfig;
use services::dataset::HttpDatasetFetcher;
use session::dispatch::{Dispatcher, Outbound};

fn init_tracing() {
    // stdout carries the protocol, logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wanted_check=debug")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    tracing::info!(
        dataset_url = %cfg.dataset_url,
        fetch_timeout_secs = cfg.fetch_timeout.as_secs(),
        "wanted-check ready"
    );

    let fetcher = Arc::new(HttpDatasetFetcher::new(
        cfg.dataset_url.clone(),
        cfg.fetch_timeout,
    ));

    let (reply_tx, reply_rx) = mpsc::channel::<Outbound>(256);
    let (line_tx, line_rx) = mpsc::channel::<String>(64);
    let writer = tokio::spawn(write_lines(reply_rx, line_rx));

    let mut dispatcher = Dispatcher::new(fetcher, reply_tx, cfg.session_queue);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable input line");
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let immediate = match protocol::parse(&line) {
            Ok(protocol::Request::Ping { id }) => protocol::pong(id),
            Ok(protocol::Request::Event(event)) => {
                dispatcher.dispatch(event).await;
                continue;
            }
            Err(rejected) => {
                tracing::debug!(error = %rejected.error, "rejected request");
                protocol::err(rejected.id, rejected.error.to_string())
            }
        };

        if line_tx.send(immediate).await.is_err() {
            break;
        }
    }

    tracing::info!(
        sessions = dispatcher.active_sessions(),
        "input closed, waiting for in-flight searches"
    );
    drop(dispatcher);
    drop(line_tx);

    if let Err(e) = writer.await {
        tracing::error!(error = %e, "writer task failed");
    }
}

async fn write_lines(mut replies: mpsc::Receiver<Outbound>, mut lines: mpsc::Receiver<String>) {
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            Some(out) = replies.recv() => protocol::render(&out),
            Some(line) = lines.recv() => line,
            else => break,
        };

        let written = async {
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await
        }
        .await;

        if let Err(e) = written {
            tracing::error!(error = %e, "stdout closed");
            break;
        }
    }
}
