//! Transaction analytics: categorization, spending summary, health score
//!
//! A lightweight pipeline beside the agents: keyword categorization for
//! bank transactions, a per-category spending roll-up, and a 100-point
//! financial health score. A model-assisted categorizer covers
//! descriptions the keyword table misses.

use crate::prompts::categorize_prompt;
use fintel_llm::{Content, GenerateRequest, ModelBackend};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Category assigned when no rule or model matches
pub const OTHER_CATEGORY: &str = "Other";

/// Transaction direction as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Credit,
    Debit,
}

/// One categorized bank transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    pub amount: f64,
    pub date: String,
    #[serde(rename = "type")]
    pub direction: Direction,
    #[serde(default)]
    pub category: String,
}

// Keyword rules checked in order; first hit wins
const CATEGORY_RULES: [(&[&str], &str); 7] = [
    (&["zomato", "swiggy"], "Food & Dining"),
    (&["salary"], "Income"),
    (&["uber"], "Transport"),
    (&["netflix"], "Entertainment"),
    (&["sip", "mutual fund"], "Investments"),
    (&["rent"], "Rent & Utilities"),
    (&["groceries"], "Groceries"),
];

/// Categorize a transaction description by keyword
pub fn categorize(description: &str) -> &'static str {
    let desc = description.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| desc.contains(needle)))
        .map_or(OTHER_CATEGORY, |(_, category)| category)
}

/// Parse and categorize a raw transaction list
///
/// Malformed rows are dropped, not fatal; the provider payload is not
/// under our control.
pub fn process_transactions(raw: &Value) -> Vec<Transaction> {
    let Some(rows) = raw.as_array() else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            let mut txn: Transaction = match serde_json::from_value(row.clone()) {
                Ok(txn) => txn,
                Err(e) => {
                    debug!(error = %e, "Skipping malformed transaction row");
                    return None;
                }
            };
            txn.category = categorize(&txn.description).to_string();
            Some(txn)
        })
        .collect()
}

/// Flatten the provider's bank payload into plain transaction rows
///
/// Provider rows are positional arrays `[amount, narration, date, type]`
/// nested per bank; the pipeline wants one flat list of objects. Rows that
/// do not fit are carried through as-is and dropped during parsing.
pub fn flatten_bank_payload(raw: &Value) -> Value {
    let banks = raw
        .get("bankTransactions")
        .and_then(Value::as_array)
        .map_or(&[] as &[Value], Vec::as_slice);

    let rows: Vec<Value> = banks
        .iter()
        .flat_map(|bank| {
            bank.get("txns")
                .and_then(Value::as_array)
                .map_or(&[] as &[Value], Vec::as_slice)
        })
        .map(|row| match row.as_array() {
            Some(cells) => json!({
                "amount": cells.first().cloned().unwrap_or(Value::Null),
                "description": cells.get(1).cloned().unwrap_or(Value::Null),
                "date": cells.get(2).cloned().unwrap_or(Value::Null),
                "type": cells.get(3).cloned().unwrap_or(Value::Null),
            }),
            None => row.clone(),
        })
        .collect();

    Value::Array(rows)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum debit amounts per category, rounded to two decimals
pub fn spending_summary(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut summary: BTreeMap<String, f64> = BTreeMap::new();
    for txn in transactions {
        if txn.direction == Direction::Debit {
            *summary.entry(txn.category.clone()).or_default() += txn.amount;
        }
    }
    summary.values_mut().for_each(|total| *total = round2(*total));
    summary
}

/// Score breakdown out of 100 points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScore {
    pub savings_score: u32,
    pub emergency_fund_score: u32,
    pub investment_score: u32,
    pub total_score: u32,
}

// Emergency-fund progress is not yet derivable from provider data; this
// placeholder lands in the middle band.
const EMERGENCY_FUND_PROGRESS: f64 = 0.64;

/// Compute the 100-point financial health score
///
/// Savings rate earns up to 40 points, the emergency fund up to 30, and
/// the investment level (total investments against annualized income) up
/// to 30.
pub fn health_score(transactions: &[Transaction], total_investments: f64) -> HealthScore {
    let income: f64 = transactions
        .iter()
        .filter(|t| t.direction == Direction::Credit)
        .map(|t| t.amount)
        .sum();
    let spending: f64 = transactions
        .iter()
        .filter(|t| t.direction == Direction::Debit)
        .map(|t| t.amount)
        .sum();

    let savings_rate = if income > 0.0 {
        (income - spending) / income
    } else {
        0.0
    };
    let savings_score = if savings_rate > 0.20 {
        40
    } else if savings_rate > 0.10 {
        25
    } else {
        10
    };

    let emergency_fund_score = if EMERGENCY_FUND_PROGRESS > 0.9 {
        30
    } else if EMERGENCY_FUND_PROGRESS > 0.5 {
        20
    } else {
        5
    };

    // Income is a monthly figure; compare investments to a year of it
    let annual_income = income * 12.0;
    let investment_ratio = if annual_income > 0.0 {
        total_investments / annual_income
    } else {
        0.0
    };
    let investment_score = if investment_ratio > 1.0 {
        30
    } else if investment_ratio > 0.5 {
        20
    } else {
        10
    };

    HealthScore {
        savings_score,
        emergency_fund_score,
        investment_score,
        total_score: savings_score + emergency_fund_score + investment_score,
    }
}

/// Categorize a description with the model, falling back to `"Other"`
///
/// The model is told to answer with a bare category name; surrounding
/// quotes and whitespace are stripped from whatever comes back.
pub async fn categorize_with_model(
    backend: &dyn ModelBackend,
    model: &str,
    description: &str,
) -> String {
    let request = GenerateRequest::builder(model)
        .add_content(Content::user(categorize_prompt(description)))
        .max_output_tokens(16)
        .temperature(0.0)
        .build();

    match backend.generate(request).await {
        Ok(response) => {
            let category = response.text().trim().replace(['\'', '"'], "");
            if category.is_empty() {
                OTHER_CATEGORY.to_string()
            } else {
                category
            }
        }
        Err(e) => {
            warn!(error = %e, "Model categorization failed");
            OTHER_CATEGORY.to_string()
        }
    }
}
