//! Loading an application environment with a derived schema
//!
//! Run with `RUST_LOG=envtag=debug` to see each field being bound.

use envtag::EnvConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, EnvConfig)]
struct AppEnv {
    #[env("ENVIRONMENT;oneof=development,test,staging,production")]
    pub environment: String,

    #[env("ENCRYPTION_KEY")]
    pub encryption_key: String,

    #[env("FETCH_SYSTEM_TOKEN")]
    pub api_token_systems: String,

    #[env("POST_SYSTEM_TOKEN")]
    pub api_token_integrations: String,

    // Must point at a local emulator
    #[env("PUBSUB_EMULATOR_HOST;regex=^(http|https)://(localhost|127.0.0.1):[0-9]+$")]
    pub pubsub_host_url: String,

    #[env("PUBSUB_PROJECT_ID")]
    pub pubsub_project_id: String,

    #[env("VERSION;optional")]
    pub version: f64,

    #[env("CONCURRENCY;min=1")]
    pub concurrency: i64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("ENVIRONMENT", "development");
    std::env::set_var("ENCRYPTION_KEY", "dev-only-key");
    std::env::set_var("FETCH_SYSTEM_TOKEN", "fetch-token");
    std::env::set_var("POST_SYSTEM_TOKEN", "post-token");
    std::env::set_var("PUBSUB_EMULATOR_HOST", "http://localhost:8085");
    std::env::set_var("PUBSUB_PROJECT_ID", "local-project");
    std::env::set_var("CONCURRENCY", "4");

    let env = AppEnv::from_env()?;

    println!("Configuration loaded:");
    println!("  Environment: {}", env.environment);
    println!("  Pub/Sub: {} ({})", env.pubsub_host_url, env.pubsub_project_id);
    println!("  Version: {}", env.version);
    println!("  Concurrency: {}", env.concurrency);
    println!(
        "  Tokens set: {}",
        !env.encryption_key.is_empty()
            && !env.api_token_systems.is_empty()
            && !env.api_token_integrations.is_empty()
    );

    // A bad value is reported with the field and key it belongs to
    std::env::set_var("CONCURRENCY", "0");
    if let Err(e) = AppEnv::from_env() {
        println!("Rejected: {e}");
    }

    Ok(())
}
