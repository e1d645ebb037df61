//! Strategist — investment strategy with a market-performance tool
//!
//! The only agent wired through the tool bridge: the model may look up
//! annualized returns for ticker symbols before committing to a strategy.

use crate::agents::structured::{StructuredContract, resolve};
use crate::agents::AgentDeps;
use crate::bridge::ToolBridge;
use crate::error::AgentError;
use crate::prompts::{STRATEGIST_SYSTEM_PROMPT, strategist_prompt};
use crate::tools::MarketPerformanceTool;
use fintel_mcp::DataKind;
use serde_json::{Value, json};
use std::sync::Arc;

/// Data kinds the strategy is built from
const KINDS: [DataKind; 2] = [DataKind::StockTransactions, DataKind::MfTransactions];

/// Document field holding the last good strategy payload
const LAST_STRATEGY_FIELD: &str = "last_strategy";

fn fallback() -> Value {
    json!({
        "summary": "A baseline strategy while portfolio data is limited: prioritize broad diversification and steady contributions.",
        "recommendations": [
            {
                "action": "Invest monthly into a diversified index fund",
                "rationale": "Rupee-cost averaging into the broad market beats timing it for most investors.",
            },
            {
                "action": "Review your portfolio allocation each quarter",
                "rationale": "Periodic rebalancing keeps risk aligned with your goals as positions drift.",
            },
        ],
    })
}

const CONTRACT: StructuredContract = StructuredContract {
    cache_field: LAST_STRATEGY_FIELD,
    list_field: "recommendations",
    fallback,
};

/// Produce an investment strategy for the user
///
/// The envelope holds the whole strategy object JSON-encoded as a string;
/// its recommendation list always carries at least two entries.
pub async fn plan(deps: &AgentDeps, user_id: &str) -> Value {
    let data = deps.gather(user_id, &KINDS, false).await;

    let bridge = ToolBridge::new(
        Arc::clone(deps.backend()),
        Arc::new(MarketPerformanceTool::new()),
    );
    let request = deps.request(STRATEGIST_SYSTEM_PROMPT, strategist_prompt(&data));
    let model_result = bridge.generate(request).await.map_err(AgentError::from);

    let payload = resolve(deps.store(), user_id, model_result, &CONTRACT).await;
    let encoded = serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string());
    json!({ "strategy": encoded })
}
