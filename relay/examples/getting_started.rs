//! Getting Started Example - Your First Publish
//!
//! Demonstrates the complete workflow from the crate's quick start: open a
//! `RelayCore` over a scratch data directory, register an endpoint, attach
//! a subscriber, and publish a message through the full pipeline (ACL ->
//! rate limit -> circuit breaker -> backpressure -> budget -> fan-out ->
//! dispatch).

use std::sync::Arc;

use relay::prelude::*;

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    tracing_subscriber::fmt::init();

    let data_dir = tempfile::tempdir().map_err(|e| RelayError::Config(e.to_string()))?;
    let config = RelayConfig::builder()
        .with_data_dir(data_dir.path())
        .build()
        .map_err(|e| RelayError::Config(e.to_string()))?;
    let core = RelayCore::new(config).await?;

    core.register_endpoint("relay.agent.sess1")?;

    core.subscribe(
        "relay.agent.*",
        Arc::new(|subject, payload, envelope| {
            println!(
                "[{subject}] hop {}/{}: {payload}",
                envelope.budget.hop_count, envelope.budget.max_hops
            );
        }),
    )?;

    let outcome = core
        .publish(
            "relay.agent.sess1",
            serde_json::json!({"content": "hello from getting_started"}),
            PublishOptions {
                from: "relay.human.console.c1".to_string(),
                ..Default::default()
            },
        )
        .await?;

    println!(
        "delivered to {} endpoint(s), {} rejected",
        outcome.delivered_to,
        outcome.rejected.len()
    );

    let metrics = core.get_metrics().await?;
    println!("total messages indexed: {}", metrics.index.total_messages);

    Ok(())
}
