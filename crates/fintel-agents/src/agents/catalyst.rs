//! Catalyst — growth opportunity scouting

use crate::agents::structured::{StructuredContract, resolve};
use crate::agents::AgentDeps;
use crate::prompts::{CATALYST_SYSTEM_PROMPT, catalyst_prompt};
use fintel_mcp::DataKind;
use serde_json::{Value, json};

/// Data kinds the opportunity scan looks at
const KINDS: [DataKind; 3] = [
    DataKind::NetWorth,
    DataKind::EpfDetails,
    DataKind::MfTransactions,
];

/// Document field holding the last good opportunity payload
const LAST_OPPORTUNITIES_FIELD: &str = "last_opportunities";

fn fallback() -> Value {
    json!({"opportunities": [
        {
            "title": "Build an emergency fund",
            "description": "Set aside three to six months of expenses in a liquid account before chasing returns.",
            "potential_impact": "Protects investments from forced selling during emergencies.",
        },
        {
            "title": "Start a systematic investment plan",
            "description": "A monthly SIP into a diversified index fund compounds steadily regardless of timing.",
            "potential_impact": "Long-term wealth growth with minimal effort.",
        },
    ]})
}

const CONTRACT: StructuredContract = StructuredContract {
    cache_field: LAST_OPPORTUNITIES_FIELD,
    list_field: "opportunities",
    fallback,
};

/// Scout the user's finances for growth opportunities
///
/// The envelope holds the whole opportunity payload JSON-encoded as a
/// string; the string decodes to an object whose `opportunities` list
/// always carries at least two opportunities.
pub async fn scout(deps: &AgentDeps, user_id: &str) -> Value {
    let data = deps.gather(user_id, &KINDS, false).await;
    let model_result = deps
        .generate(CATALYST_SYSTEM_PROMPT, catalyst_prompt(&data))
        .await;

    let payload = resolve(deps.store(), user_id, model_result, &CONTRACT).await;
    let encoded = serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string());
    json!({ "opportunities": encoded })
}
