//! Guardian — risk scanning over spending, credit and fund activity

use crate::agents::structured::{StructuredContract, resolve};
use crate::agents::AgentDeps;
use crate::prompts::{GUARDIAN_SYSTEM_PROMPT, guardian_prompt};
use fintel_mcp::DataKind;
use serde_json::{Value, json};

/// Data kinds the risk scan looks at
const KINDS: [DataKind; 3] = [
    DataKind::BankTransactions,
    DataKind::CreditReport,
    DataKind::MfTransactions,
];

/// Document field holding the last good alert payload
const LAST_ALERTS_FIELD: &str = "last_alerts";

fn fallback() -> Value {
    json!({"alerts": [
        {
            "severity": "info",
            "title": "Monitoring active",
            "message": "Your financial data is being monitored. No urgent risks detected right now.",
        },
        {
            "severity": "info",
            "title": "Connect your accounts",
            "message": "Link your accounts and refresh your data for a deeper risk scan.",
        },
    ]})
}

const CONTRACT: StructuredContract = StructuredContract {
    cache_field: LAST_ALERTS_FIELD,
    list_field: "alerts",
    fallback,
};

/// Scan the user's finances for risks
///
/// The envelope holds the whole alert payload JSON-encoded as a string;
/// the string decodes to an object whose `alerts` list always carries at
/// least two alerts.
pub async fn scan(deps: &AgentDeps, user_id: &str) -> Value {
    let data = deps.gather(user_id, &KINDS, false).await;
    let model_result = deps
        .generate(GUARDIAN_SYSTEM_PROMPT, guardian_prompt(&data))
        .await;

    let payload = resolve(deps.store(), user_id, model_result, &CONTRACT).await;
    let encoded = serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string());
    json!({ "alerts": encoded })
}
