//! Oracle — general Q&A over all six data kinds

use crate::agents::AgentDeps;
use crate::prompts::{ORACLE_SYSTEM_PROMPT, oracle_prompt};
use fintel_mcp::DataKind;
use serde_json::{Value, json};
use tracing::warn;

/// Answer shown when the model backend is unreachable
const FALLBACK_ANSWER: &str =
    "I could not reach the model to answer your question right now. Please try again in a moment.";

/// Answer a free-form question about the user's finances
///
/// The model's text comes back verbatim in the `answer` field; a backend
/// failure degrades to a static apology rather than an error.
pub async fn ask(deps: &AgentDeps, user_id: &str, question: &str) -> Value {
    let data = deps.gather(user_id, &DataKind::ALL, false).await;

    let answer = match deps
        .generate(ORACLE_SYSTEM_PROMPT, oracle_prompt(&data, question))
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(user_id, error = %e, "Oracle model call failed");
            FALLBACK_ANSWER.to_string()
        }
    };

    json!({
        "question": question,
        "answer": answer,
    })
}
