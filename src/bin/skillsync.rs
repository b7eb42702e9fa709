//! Runs the command core over a local channel bus.
//!
//! Usage:
//!
//! ```text
//! skillsync < commands.jsonl > responses.jsonl
//! ```
//!
//! Each input line is a delivery envelope such as
//!
//! ```json
//! {"topic": "user.created.request", "payload": {"correlationKey": "c1", "id": "u1", "email": "ada@example.com"}}
//! ```
//!
//! and each response is written as a line of the same shape on the matching
//! `.response` topic. Logs go to stderr. The process provisions its topics,
//! serves `GET /health` on `APP_HOST:APP_PORT` and stops at end of input or
//! on Ctrl-C once in-flight commands have settled.

use mockable::DefaultClock;
use skillsync::{
    bus::{
        adapters::{
            ChannelBus,
            stdio::{drain_responses, pump_lines},
        },
        domain::Topic,
        ports::{SourceError, TopicAdminError},
        services::{Consumer, Dispatcher, provision_topics},
    },
    config::{AppConfig, ConfigError},
    health,
    store::adapters::InMemoryDocumentStore,
    telemetry,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::{io::BufReader, net::TcpListener, runtime::Builder, task::JoinError};
use tracing::{debug, error, info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the service.
#[derive(Debug, Error)]
enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to provision topics: {0}")]
    Provision(#[from] TopicAdminError),

    #[error("failed to bind health server: {0}")]
    Bind(#[source] std::io::Error),

    #[error("message source failed: {0}")]
    Source(#[from] SourceError),

    #[error("failed to write responses: {0}")]
    Output(#[source] std::io::Error),

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("background task failed: {0}")]
    Join(#[from] JoinError),
}

fn main() -> Result<(), BoxError> {
    let config = AppConfig::from_env().map_err(ServiceError::from)?;
    telemetry::init(&config);
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ServiceError::Runtime)?;
    let outcome = runtime.block_on(run(&config));
    // Pending stdin reads sit on the blocking pool and are never joined.
    runtime.shutdown_background();
    if let Err(err) = outcome {
        error!(error = %err, "skillsync stopped");
        return Err(err.into());
    }
    Ok(())
}

async fn run(config: &AppConfig) -> Result<(), ServiceError> {
    info!(
        project = %config.bus_project_id,
        log_format = %config.log_format,
        "starting skillsync"
    );
    let (channel, outbound) = ChannelBus::new();
    let bus = Arc::new(channel);

    let report = provision_topics(&*bus).await?;
    info!(
        created = report.created.len(),
        existing = report.existing.len(),
        "topics provisioned"
    );
    for topic in Topic::ALL {
        debug!(subscription = %topic.subscription_name(), "listening");
    }

    let listener = TcpListener::bind(config.bind_address())
        .await
        .map_err(ServiceError::Bind)?;
    info!(address = %config.bind_address(), "health server listening");
    let health_server = tokio::spawn(async move { axum::serve(listener, health::router()).await });

    let writer = tokio::spawn(drain_responses(outbound, tokio::io::stdout()));
    let input_bus = Arc::clone(&bus);
    let input = tokio::spawn(async move {
        debug!("awaiting input");
        let stdin = BufReader::new(tokio::io::stdin());
        tokio::select! {
            pumped = pump_lines(stdin, &input_bus) => match pumped {
                Ok(summary) => info!(
                    submitted = summary.submitted,
                    skipped = summary.skipped,
                    "end of input"
                ),
                Err(err) => warn!(error = %err, "failed to read input"),
            },
            _ = tokio::signal::ctrl_c() => info!("interrupted"),
        }
        input_bus.close();
    });

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::clone(&bus),
        Arc::new(DefaultClock),
    ));
    let consumer = Consumer::new(Arc::clone(&bus), dispatcher);
    let consumed = consumer.run().await;
    if consumed.is_ok() {
        input.await?;
    } else {
        input.abort();
    }
    health_server.abort();

    // The outbound channel closes once every handle to the bus is gone.
    drop(consumer);
    drop(bus);
    let written = writer.await?.map_err(ServiceError::Output)?;
    let stats = consumed?;
    info!(
        processed = stats.total(),
        nacked = stats.nacked,
        responses = written,
        "skillsync stopped"
    );
    Ok(())
}
