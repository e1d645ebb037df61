//! Service facade over sessions, agents and analytics
//!
//! Every operation authenticates first: the bearer credential resolves to
//! a user id or the call fails with `AgentError::Authentication`. Past
//! that gate the agent operations never fail — data, cache and model
//! trouble all degrade inside the pipeline.

use crate::agents::{self, AgentDeps};
use crate::analytics::{
    categorize_with_model, flatten_bank_payload, health_score, process_transactions,
    spending_summary,
};
use crate::auth::AuthVerifier;
use crate::error::{AgentError, Result};
use crate::session;
use crate::summary::summarize_kind;
use fintel_mcp::DataKind;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument};

/// Entry point for every fintel operation
pub struct FintelService {
    deps: AgentDeps,
    verifier: Arc<dyn AuthVerifier>,
}

impl FintelService {
    /// Assemble the service over wired dependencies and a credential verifier
    pub fn new(deps: AgentDeps, verifier: Arc<dyn AuthVerifier>) -> Self {
        Self { deps, verifier }
    }

    async fn authorize(&self, bearer_token: &str) -> Result<String> {
        self.verifier.verify(bearer_token).await
    }

    /// Liveness probe; no credential required
    pub fn health(&self) -> Value {
        json!({ "status": "ok" })
    }

    /// Mint a data-source session and return the provider login link
    #[instrument(skip(self, bearer_token))]
    pub async fn init_session(&self, bearer_token: &str) -> Result<Value> {
        let user_id = self.authorize(bearer_token).await?;
        session::init_session(self.deps.store(), self.deps.client(), &user_id).await
    }

    /// Force-refresh all six data kinds and return the fresh summaries
    #[instrument(skip(self, bearer_token))]
    pub async fn prefetch(&self, bearer_token: &str) -> Result<Value> {
        let user_id = self.authorize(bearer_token).await?;
        info!(user_id, "Prefetching all data kinds");
        Ok(self.deps.refresh(&user_id, &DataKind::ALL).await)
    }

    /// Oracle: answer a free-form question over all six data kinds
    #[instrument(skip(self, bearer_token, question))]
    pub async fn ask(&self, bearer_token: &str, question: &str) -> Result<Value> {
        let user_id = self.authorize(bearer_token).await?;
        Ok(agents::oracle::ask(&self.deps, &user_id, question).await)
    }

    /// Guardian: scan for financial risks
    #[instrument(skip(self, bearer_token))]
    pub async fn alerts(&self, bearer_token: &str) -> Result<Value> {
        let user_id = self.authorize(bearer_token).await?;
        Ok(agents::guardian::scan(&self.deps, &user_id).await)
    }

    /// Catalyst: scout for growth opportunities
    #[instrument(skip(self, bearer_token))]
    pub async fn opportunities(&self, bearer_token: &str) -> Result<Value> {
        let user_id = self.authorize(bearer_token).await?;
        Ok(agents::catalyst::scout(&self.deps, &user_id).await)
    }

    /// Strategist: produce an investment strategy
    #[instrument(skip(self, bearer_token))]
    pub async fn strategy(&self, bearer_token: &str) -> Result<Value> {
        let user_id = self.authorize(bearer_token).await?;
        Ok(agents::strategist::plan(&self.deps, &user_id).await)
    }

    /// Per-category spending totals from fresh bank transactions
    #[instrument(skip(self, bearer_token))]
    pub async fn spending_summary(&self, bearer_token: &str) -> Result<Value> {
        let user_id = self.authorize(bearer_token).await?;

        let raw = self
            .deps
            .fetcher()
            .fetch(&user_id, DataKind::BankTransactions)
            .await;
        let transactions = process_transactions(&flatten_bank_payload(&raw));
        Ok(json!(spending_summary(&transactions)))
    }

    /// Financial health score from fresh transactions and fund holdings
    #[instrument(skip(self, bearer_token))]
    pub async fn finhealth_score(&self, bearer_token: &str) -> Result<Value> {
        let user_id = self.authorize(bearer_token).await?;

        let bank_raw = self
            .deps
            .fetcher()
            .fetch(&user_id, DataKind::BankTransactions)
            .await;
        let mf_raw = self
            .deps
            .fetcher()
            .fetch(&user_id, DataKind::MfTransactions)
            .await;

        let transactions = process_transactions(&flatten_bank_payload(&bank_raw));
        let total_investments = summarize_kind(DataKind::MfTransactions, &mf_raw)
            .get("total_invested")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        let score = health_score(&transactions, total_investments);
        serde_json::to_value(score).map_err(|e| AgentError::Serialization(e.to_string()))
    }

    /// Categorize a single transaction description with the model
    #[instrument(skip(self, bearer_token, description))]
    pub async fn categorize_transaction(
        &self,
        bearer_token: &str,
        description: &str,
    ) -> Result<Value> {
        let _user_id = self.authorize(bearer_token).await?;

        let category = categorize_with_model(
            self.deps.backend().as_ref(),
            &self.deps.config().model,
            description,
        )
        .await;
        Ok(json!({
            "description": description,
            "category": category,
        }))
    }
}
