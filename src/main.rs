//! CallGuard - Runtime policy gate for autonomous agent LLM/tool calls
//!
//! Serves the decision endpoint and management API, and offers a local
//! check command for evaluating prompts against the stored policy.

use anyhow::Result;
use callguard::agents::{AgentRegistry, AgentsState};
use callguard::alerts::{AlertDispatcher, IntegrationStore, IntegrationsState};
use callguard::api::build_app;
use callguard::config::GuardConfig;
use callguard::events::{EventStore, EventsState};
use callguard::policy::{engine, PolicyState, PolicyStore};
use callguard::GuardPipeline;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "callguard")]
#[command(version)]
#[command(about = "Runtime policy gate for autonomous agent LLM/tool calls")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CALLGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the CallGuard server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Evaluate a prompt against the stored policy
    Check {
        /// Prompt text to evaluate
        prompt: String,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("callguard={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = if let Some(config_path) = &cli.config {
        GuardConfig::load(config_path)?
    } else {
        GuardConfig::default()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            run_server(config, host, port).await?;
        }
        Commands::Check { prompt } => {
            run_check(config, &prompt).await?;
        }
        Commands::Config { default } => {
            let shown = if default {
                GuardConfig::default()
            } else {
                config
            };
            println!("{}", toml::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}

async fn run_server(config: GuardConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let storage = config.storage.clone().with_env_overrides();

    let policy = Arc::new(PolicyStore::new(storage.policy_path()).await?);
    let events = Arc::new(EventStore::new(storage.events_path()).await?);
    let agents = Arc::new(AgentRegistry::new(storage.agents_path()).await?);
    let integrations = Arc::new(IntegrationStore::new(storage.integrations_path()).await?);
    let alerts = Arc::new(AlertDispatcher::new(
        integrations.clone(),
        Duration::from_secs(config.alerts.timeout_secs),
    ));

    let pipeline = GuardPipeline::new(policy.clone(), events.clone(), alerts);

    let app = build_app(
        pipeline,
        PolicyState { store: policy },
        EventsState {
            store: events.clone(),
        },
        AgentsState {
            registry: agents,
            events,
        },
        IntegrationsState {
            store: integrations,
        },
        &config.server.cors_origins,
    );

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("CallGuard server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_check(config: GuardConfig, prompt: &str) -> Result<()> {
    let storage = config.storage.with_env_overrides();
    let store = PolicyStore::new(storage.policy_path()).await?;
    let verdict = engine::evaluate(prompt, &store.current().await);

    if verdict.blocked {
        println!("BLOCKED  techniques: {}", verdict.techniques.join(", "));
    } else {
        println!("allowed  techniques: {}", verdict.techniques.join(", "));
    }

    Ok(())
}
