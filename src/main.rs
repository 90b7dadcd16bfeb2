use anyhow::Context;
use clap::Parser;
use course_registry::api;
use course_registry::utils::logger::{self, LogFormat};
use course_registry::utils::validation::Validate;
use course_registry::{AppConfig, AppState, CliArgs, EnrollmentSettings, InMemoryStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Logging settings come from the file, so parse it before the subscriber is up.
    let mut config = match AppConfig::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file is valid TOML");
            std::process::exit(1);
        }
    };

    logger::init_logger(
        args.verbose,
        config.log_level(),
        LogFormat::parse(config.log_format()),
    );
    tracing::info!("Starting course-registry");

    if let Err(e) = config.apply_env_overrides() {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    args.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config);
    if args.check_config {
        return Ok(());
    }

    let store = Arc::new(InMemoryStore::new());
    let settings = Arc::new(EnrollmentSettings::new(config.max_students_per_course()));
    let state = Arc::new(AppState::new(store, settings));
    let app = api::build_app(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    api::serve(listener, app, shutdown_signal())
        .await
        .context("server terminated with an error")?;

    tracing::info!("👋 Shut down cleanly");
    Ok(())
}

fn display_config_summary(config: &AppConfig) {
    println!("📋 Configuration Summary:");
    println!("  Bind address: {}", config.bind_address());
    println!("  Max students per course: {}", config.max_students_per_course());
    println!("  Log format: {}", config.log_format());
    if let Some(level) = config.log_level() {
        println!("  Log level: {}", level);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
