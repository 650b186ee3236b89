//! Basic usage example for verifchain
//!
//! Run with `RUST_LOG=verifchain=debug` to see each rule as it is evaluated.

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use verifchain::prelude::*;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut registry = RuleRegistry::<String>::with_builtins();
    registry
        .add_rule(RuleSpec::new(
            "username",
            Control::pattern("^[a-z0-9_]+$")?,
            "Only lowercase letters, digits and underscores",
        ))?
        .add_rule(RuleSpec::new(
            "available",
            Control::async_fn(|name: String, _: Vec<String>| async move {
                // Stands in for a database lookup.
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok::<_, BoxError>(!["admin", "root"].iter().any(|taken| *taken == name))
            }),
            ErrorMessage::func(|name: &String, _: &[String]| format!("\"{name}\" is taken")),
        ))?;

    let chain = "required|length:3:16|username|available";
    for candidate in ["alice", "Al", "root", ""] {
        let report = registry.evaluate(chain, &candidate.to_owned(), false).await?;
        if report.success {
            println!("✓ {candidate:?} is valid");
        } else {
            let messages: Vec<_> = report.messages().collect();
            println!("✗ {candidate:?}: {}", messages.join("; "));
        }
    }

    let optional = "notRequired|length:3:16|username";
    let report = registry.evaluate_default(optional, &String::new()).await?;
    println!("\nempty optional field passes: {}", report.success);

    Ok(())
}
