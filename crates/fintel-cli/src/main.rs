//! Command-line interface for fintel
//!
//! Wires the agent service over an in-memory document store and the Gemini
//! backend. State lives only for the process; each invocation starts from
//! an unlinked user, so `init-session` output is mostly useful against a
//! local mock data source.

mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fintel_agents::{AgentDeps, FintelConfig, FintelService};
use fintel_agents::auth::StaticAuthVerifier;
use fintel_llm::providers::GeminiBackend;
use fintel_store::MemoryStore;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fintel")]
#[command(about = "Personal finance agents over your linked accounts", long_about = None)]
struct Args {
    /// Bearer credential presented to the service
    #[arg(long, env = "FINTEL_TOKEN", default_value = "local-token")]
    token: String,

    /// User id the credential resolves to
    #[arg(long, env = "FINTEL_USER", default_value = "local-user")]
    user: String,

    /// Base URL of the financial data source
    #[arg(long, env = "FINTEL_MCP_URL")]
    mcp_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mint a data-source session and print the login link
    InitSession,
    /// Refresh all six data kinds and print the fresh summaries
    Prefetch,
    /// Ask Oracle a free-form question about your finances
    Ask {
        /// The question to ask
        question: String,
    },
    /// Run the Guardian risk scan
    Alerts,
    /// Run the Catalyst opportunity scan
    Opportunities,
    /// Produce a Strategist investment strategy
    Strategy,
    /// Per-category spending totals from bank transactions
    Spending,
    /// Financial health score breakdown
    Score,
    /// Categorize a transaction description with the model
    Categorize {
        /// The transaction description
        description: String,
    },
    /// Service liveness probe
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let args = Args::parse();

    let mut config = FintelConfig::default().with_env_mcp_url();
    if let Some(url) = &args.mcp_url {
        config.mcp_base_url = url.clone();
    }

    let backend = GeminiBackend::from_env().context("failed to configure the Gemini backend")?;
    let deps = AgentDeps::new(
        Arc::new(MemoryStore::new()),
        Arc::new(backend),
        config,
    )
    .context("failed to wire the agent pipeline")?;
    let verifier = StaticAuthVerifier::new().with_token(&args.token, &args.user);
    let service = FintelService::new(deps, Arc::new(verifier));

    info!(user = %args.user, "fintel service ready");

    let output: Value = match args.command {
        Command::InitSession => service.init_session(&args.token).await?,
        Command::Prefetch => service.prefetch(&args.token).await?,
        Command::Ask { question } => service.ask(&args.token, &question).await?,
        Command::Alerts => service.alerts(&args.token).await?,
        Command::Opportunities => service.opportunities(&args.token).await?,
        Command::Strategy => service.strategy(&args.token).await?,
        Command::Spending => service.spending_summary(&args.token).await?,
        Command::Score => service.finhealth_score(&args.token).await?,
        Command::Categorize { description } => {
            service.categorize_transaction(&args.token, &description).await?
        }
        Command::Health => service.health(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
