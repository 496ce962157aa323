//! Walkthrough of the full login-token lifecycle against a live
//! authority with deliberately short durations, so the background sweep
//! is observable within seconds.
//!
//! Run with `RUST_LOG=debug` to watch the sweeper schedule itself.

use std::time::Duration;

use tilegate::SessionAuthority;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let authority = SessionAuthority::builder()
        .token_lifetime(Duration::from_secs(5))
        .sweep_interval(Duration::from_secs(2))
        .start();

    // A player authenticates (password checking happens upstream);
    // the authority mints the cookie the request layer will set.
    let cookie = authority.log_in("bob").await?;
    println!("issued cookie: {cookie}");

    let verdict = authority.check(&cookie).await;
    println!(
        "check: username={} authenticated={}",
        verdict.username, verdict.authenticated
    );

    // Explicit logout.
    authority.log_out(&cookie).await;
    let verdict = authority.check(&cookie).await;
    println!("after logout: authenticated={}", verdict.authenticated);

    // A second login left to expire: the sweeper evicts it.
    let abandoned = authority.log_in("alice").await?;
    println!("issued cookie: {abandoned}");
    println!(
        "tokens in memory before expiry: {}",
        authority.active_tokens().await
    );

    tokio::time::sleep(Duration::from_secs(8)).await;
    let verdict = authority.check(&abandoned).await;
    println!(
        "after expiry: authenticated={} tokens in memory: {}",
        verdict.authenticated,
        authority.active_tokens().await
    );

    authority.shutdown().await;
    Ok(())
}
