mod args;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::Mutex;

use mas_common::telemetry::init_tracing;
use mas_dashboard::{Document, HttpStatusSource, StatusPoller, TimestampFormat};

use crate::args::Args;
use crate::output::{redraw, render_dashboard};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let otel_guard = init_tracing(
        "mas-dashboard",
        args.otlp_endpoint.as_deref(),
        args.otlp_token.as_deref(),
    );

    let time_format = TimestampFormat::new(&args.time_format)?;
    let source = HttpStatusSource::new(&args.server_url)?;
    tracing::info!(url=%source.url(), markup=%args.markup, "mas-dashboard starting");

    let document = Arc::new(Mutex::new(Document::for_contract(args.markup)));
    let poller = StatusPoller::new(Arc::new(source), document.clone(), args.markup, time_format);

    if args.once {
        poller.refresh().await;
        print!("{}", render_dashboard(&*document.lock().await, &args.server_url));
    } else {
        let mut revisions = poller.subscribe();
        let handle = poller.start();
        redraw(&*document.lock().await, &args.server_url);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                _ = &mut ctrl_c => break,
                changed = revisions.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    redraw(&*document.lock().await, &args.server_url);
                }
            }
        }

        handle.stop();
        tracing::info!("mas-dashboard stopped");
    }

    if let Some(provider) = otel_guard {
        if let Err(e) = provider.shutdown() {
            eprintln!("failed to flush traces: {e}");
        }
    }
    Ok(())
}
