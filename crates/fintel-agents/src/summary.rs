//! Summarizer/Sanitizer — bounded, storage-safe projections of raw data
//!
//! Raw provider payloads are arbitrarily nested and unbounded; summaries
//! are flat, capped, and always JSON-serializable. Every field access here
//! is defensive: a missing key, wrong type, or unparsable number degrades
//! to a safe default (0 / "Unknown" / "N/A" / empty list) instead of
//! raising. Error-marked kinds pass through untouched so downstream
//! normalization can flag them.

use crate::fetcher::{FinancialBundle, is_error_marker};
use fintel_mcp::DataKind;
use fintel_store::cache::now_stamp;
use serde_json::{Map, Value, json};
use tracing::warn;

const MAX_BANKS: usize = 2;
const MAX_RECENT_TXNS: usize = 5;
const MAX_DESCRIPTION_CHARS: usize = 100;
const MAX_FUNDS: usize = 3;
const MAX_FUND_NAME_CHARS: usize = 50;
const MAX_EPF_ACCOUNTS: usize = 2;
const MAX_STOCK_TXNS: usize = 5;

// Index of the transaction-amount column in positional txn rows
// [order_type, date, price, units, amount]
const TXN_AMOUNT_INDEX: usize = 4;

/// Summarize a full bundle into the storage-safe kind map
///
/// The result is stamped with `generated_at` and round-tripped through a
/// JSON encode/decode; if that ever fails, a minimal fallback object with
/// only an error marker and timestamp is returned instead.
pub fn summarize_bundle(bundle: &FinancialBundle) -> Value {
    let mut summary = Map::new();

    for (kind, raw) in bundle {
        let slice = if is_error_marker(raw) {
            raw.clone()
        } else {
            summarize_kind(*kind, raw)
        };
        summary.insert(kind.as_str().to_string(), slice);
    }

    summary.insert("generated_at".to_string(), Value::String(now_stamp()));

    ensure_serializable(Value::Object(summary))
}

/// Summarize one data kind's raw payload
pub fn summarize_kind(kind: DataKind, raw: &Value) -> Value {
    match kind {
        DataKind::BankTransactions => summarize_bank_transactions(raw),
        DataKind::CreditReport => summarize_credit_report(raw),
        DataKind::MfTransactions => summarize_mf_transactions(raw),
        DataKind::NetWorth => summarize_net_worth(raw),
        DataKind::EpfDetails => summarize_epf_details(raw),
        DataKind::StockTransactions => summarize_stock_transactions(raw),
    }
}

fn ensure_serializable(summary: Value) -> Value {
    let round_trip = serde_json::to_string(&summary)
        .and_then(|encoded| serde_json::from_str::<Value>(&encoded));

    match round_trip {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Summary failed JSON round-trip; storing fallback");
            json!({
                "error": "summary serialization failed",
                "generated_at": now_stamp(),
            })
        }
    }
}

// Coercion helpers. Numbers may arrive as JSON numbers or numeric strings.

fn lossy_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn f64_or_zero(value: Option<&Value>) -> f64 {
    lossy_f64(value).unwrap_or(0.0)
}

fn string_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn array_of<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Bank transactions: first 2 banks, up to 5 recent transactions each
///
/// `total_transactions` counts every transaction of the summarized banks.
fn summarize_bank_transactions(raw: &Value) -> Value {
    let all_banks = array_of(raw, "bankTransactions");
    let banks = &all_banks[..all_banks.len().min(MAX_BANKS)];

    let mut total_transactions = 0usize;
    let mut bank_summaries = Vec::with_capacity(banks.len());

    for bank in banks {
        let txns = array_of(bank, "txns");
        total_transactions += txns.len();

        let recent: Vec<Value> = txns
            .iter()
            .take(MAX_RECENT_TXNS)
            .map(|txn| {
                let row = txn.as_array().map_or(&[] as &[Value], Vec::as_slice);
                json!({
                    "amount": f64_or_zero(row.first()),
                    "description": truncate_chars(
                        &string_or(row.get(1), "Unknown"),
                        MAX_DESCRIPTION_CHARS,
                    ),
                    "date": string_or(row.get(2), "Unknown"),
                    "type": string_or(row.get(3), "Unknown"),
                })
            })
            .collect();

        bank_summaries.push(json!({
            "name": string_or(bank.get("bank"), "Unknown"),
            "transaction_count": txns.len(),
            "recent_transactions": recent,
        }));
    }

    json!({
        "total_banks": banks.len(),
        "total_transactions": total_transactions,
        "banks": bank_summaries,
    })
}

/// Credit report: bureau score as string, account count, outstanding balance
///
/// The bureau wraps everything in `creditReports[0].creditReportData`; only
/// the first report is read.
fn summarize_credit_report(raw: &Value) -> Value {
    let report = array_of(raw, "creditReports")
        .first()
        .and_then(|entry| entry.get("creditReportData"))
        .unwrap_or(&Value::Null);

    let score = string_or(
        report.get("score").and_then(|s| s.get("bureauScore")),
        "N/A",
    );

    let summary = report
        .get("creditAccount")
        .and_then(|account| account.get("creditAccountSummary"))
        .unwrap_or(&Value::Null);

    let total_accounts = lossy_f64(
        summary
            .get("account")
            .and_then(|account| account.get("creditAccountTotal")),
    )
    .map_or(0_i64, |count| count as i64);

    let total_outstanding = lossy_f64(
        summary
            .get("totalOutstandingBalance")
            .and_then(|balance| balance.get("outstandingBalanceAll")),
    )
    .map_or(0_i64, |balance| balance as i64);

    json!({
        "score": score,
        "total_accounts": total_accounts,
        "total_outstanding_balance": total_outstanding,
    })
}

/// Mutual funds: first 3 funds summarized, invested total over all funds
///
/// The invested total sums the amount column of every transaction in every
/// fund, not only the 3 that make the `funds` list; unparsable values are
/// skipped.
fn summarize_mf_transactions(raw: &Value) -> Value {
    let funds = array_of(raw, "mfTransactions");

    let fund_summaries: Vec<Value> = funds
        .iter()
        .take(MAX_FUNDS)
        .map(|fund| {
            json!({
                "scheme_name": truncate_chars(
                    &string_or(fund.get("schemeName"), "Unknown"),
                    MAX_FUND_NAME_CHARS,
                ),
                "folio_id": string_or(fund.get("folioId"), "Unknown"),
                "transaction_count": array_of(fund, "txns").len(),
            })
        })
        .collect();

    let total_invested: f64 = funds
        .iter()
        .flat_map(|fund| array_of(fund, "txns"))
        .filter_map(|txn| lossy_f64(txn.get(TXN_AMOUNT_INDEX)))
        .sum();

    json!({
        "total_funds": funds.len(),
        "funds": fund_summaries,
        "total_invested": total_invested,
    })
}

/// Net worth: totals from the first parseable entry, zeros otherwise
fn summarize_net_worth(raw: &Value) -> Value {
    let entries = array_of(raw, "netWorth");

    let first_parseable = entries.iter().find(|entry| {
        lossy_f64(entry.get("totalAssets")).is_some()
            || lossy_f64(entry.get("totalLiabilities")).is_some()
            || lossy_f64(entry.get("netWorth")).is_some()
    });

    match first_parseable {
        Some(entry) => json!({
            "total_assets": f64_or_zero(entry.get("totalAssets")),
            "total_liabilities": f64_or_zero(entry.get("totalLiabilities")),
            "net_worth": f64_or_zero(entry.get("netWorth")),
        }),
        None => json!({
            "total_assets": 0.0,
            "total_liabilities": 0.0,
            "net_worth": 0.0,
        }),
    }
}

/// EPF: account count and running balance over the first 2 accounts
fn summarize_epf_details(raw: &Value) -> Value {
    let accounts = array_of(raw, "epfDetails");

    let total_balance: f64 = accounts
        .iter()
        .take(MAX_EPF_ACCOUNTS)
        .filter_map(|account| lossy_f64(account.get("currentBalance")))
        .sum();

    json!({
        "total_accounts": accounts.len(),
        "total_balance": total_balance,
    })
}

/// Stocks: transaction count and invested total over the first 5
///
/// Rows are positional like mutual-fund transactions, amount in the last
/// column.
fn summarize_stock_transactions(raw: &Value) -> Value {
    let txns = array_of(raw, "stockTransactions");

    let total_invested: f64 = txns
        .iter()
        .take(MAX_STOCK_TXNS)
        .filter_map(|txn| lossy_f64(txn.get(TXN_AMOUNT_INDEX)))
        .sum();

    json!({
        "total_transactions": txns.len(),
        "total_invested": total_invested,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn bank_fixture(banks: usize, txns_per_bank: usize) -> Value {
        let banks: Vec<Value> = (0..banks)
            .map(|b| {
                let txns: Vec<Value> = (0..txns_per_bank)
                    .map(|t| {
                        json!([
                            format!("{}.50", 100 + t),
                            format!("UPI-MERCHANT-{b}-{t}"),
                            "2025-08-01",
                            "DEBIT"
                        ])
                    })
                    .collect();
                json!({"bank": format!("Bank {b}"), "txns": txns})
            })
            .collect();
        json!({"bankTransactions": banks})
    }

    #[test]
    fn test_bank_caps_banks_and_recent_transactions() {
        let summary = summarize_bank_transactions(&bank_fixture(3, 10));

        assert_eq!(summary["total_banks"], 2);
        assert_eq!(summary["total_transactions"], 20);

        let first_bank = &summary["banks"][0];
        let recent = first_bank["recent_transactions"].as_array().unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0]["amount"], 100.5);
        assert_eq!(recent[0]["description"], "UPI-MERCHANT-0-0");
        assert_eq!(recent[4]["description"], "UPI-MERCHANT-0-4");
    }

    #[test]
    fn test_bank_tolerates_malformed_rows() {
        let raw = json!({"bankTransactions": [
            {"bank": 42, "txns": [[], "not-a-row", [null, null], ["12.0"]]},
            {"txns": null},
        ]});
        let summary = summarize_bank_transactions(&raw);

        assert_eq!(summary["total_banks"], 2);
        assert_eq!(summary["banks"][0]["name"], "42");
        assert_eq!(summary["banks"][1]["name"], "Unknown");

        let recent = summary["banks"][0]["recent_transactions"].as_array().unwrap();
        assert_eq!(recent[0]["amount"], 0.0);
        assert_eq!(recent[0]["description"], "Unknown");
        assert_eq!(recent[3]["amount"], 12.0);
    }

    #[test]
    fn test_bank_truncates_description() {
        let long = "x".repeat(250);
        let raw = json!({"bankTransactions": [{"bank": "B", "txns": [[1, long, "d", "t"]]}]});
        let summary = summarize_bank_transactions(&raw);
        let description = summary["banks"][0]["recent_transactions"][0]["description"]
            .as_str()
            .unwrap();
        assert_eq!(description.len(), 100);
    }

    #[test]
    fn test_credit_report_defaults() {
        let summary = summarize_credit_report(&json!({}));
        assert_eq!(summary["score"], "N/A");
        assert_eq!(summary["total_accounts"], 0);
        assert_eq!(summary["total_outstanding_balance"], 0);
    }

    #[test]
    fn test_credit_report_reads_first_report() {
        let raw = json!({"creditReports": [{"creditReportData": {
            "score": {"bureauScore": 746},
            "creditAccount": {"creditAccountSummary": {
                "account": {"creditAccountTotal": "3"},
                "totalOutstandingBalance": {"outstandingBalanceAll": "125000.75"}
            }}
        }}]});
        let summary = summarize_credit_report(&raw);
        assert_eq!(summary["score"], "746");
        assert_eq!(summary["total_accounts"], 3);
        assert_eq!(summary["total_outstanding_balance"], 125000);
    }

    #[test]
    fn test_credit_report_tolerates_missing_nesting() {
        let raw = json!({"creditReports": [{"creditReportData": {
            "score": {"bureauScore": 701}
        }}]});
        let summary = summarize_credit_report(&raw);
        assert_eq!(summary["score"], "701");
        assert_eq!(summary["total_accounts"], 0);
        assert_eq!(summary["total_outstanding_balance"], 0);
    }

    #[test]
    fn test_mf_total_invested_covers_funds_beyond_displayed_three() {
        let fund = |name: &str, amount: f64| {
            json!({"schemeName": name, "folioId": "F1",
                   "txns": [["BUY", "2025-01-01", 10.0, 5.0, amount]]})
        };
        let raw = json!({"mfTransactions": [
            fund("Fund A", 1000.0),
            fund("Fund B", 2000.0),
            fund("Fund C", 3000.0),
            fund("Fund D", 4000.0),
        ]});

        let summary = summarize_mf_transactions(&raw);
        assert_eq!(summary["total_funds"], 4);
        assert_eq!(summary["funds"].as_array().unwrap().len(), 3);
        // Fund D is not displayed but its amount still counts
        assert_eq!(summary["total_invested"], 10000.0);
    }

    #[test]
    fn test_mf_skips_unparsable_amounts_and_truncates_names() {
        let raw = json!({"mfTransactions": [{
            "schemeName": "Very Long Scheme Name ".repeat(5),
            "txns": [
                ["BUY", "d", 1, 1, "500"],
                ["BUY", "d", 1, 1, "not-a-number"],
                ["BUY", "d", 1, 1, null],
                ["BUY"]
            ]
        }]});

        let summary = summarize_mf_transactions(&raw);
        assert_eq!(summary["total_invested"], 500.0);
        let name = summary["funds"][0]["scheme_name"].as_str().unwrap();
        assert_eq!(name.chars().count(), 50);
        assert_eq!(summary["funds"][0]["folio_id"], "Unknown");
        assert_eq!(summary["funds"][0]["transaction_count"], 4);
    }

    #[test]
    fn test_net_worth_stops_at_first_parseable_entry() {
        let raw = json!({"netWorth": [
            {"totalAssets": "garbage", "netWorth": {}},
            {"totalAssets": "500000", "totalLiabilities": 100000, "netWorth": 400000},
            {"totalAssets": 9.0},
        ]});

        let summary = summarize_net_worth(&raw);
        assert_eq!(summary["total_assets"], 500000.0);
        assert_eq!(summary["total_liabilities"], 100000.0);
        assert_eq!(summary["net_worth"], 400000.0);
    }

    #[test]
    fn test_net_worth_defaults_to_zeros() {
        for raw in [json!({}), json!({"netWorth": "wrong"}), json!({"netWorth": []})] {
            let summary = summarize_net_worth(&raw);
            assert_eq!(summary["total_assets"], 0.0);
            assert_eq!(summary["total_liabilities"], 0.0);
            assert_eq!(summary["net_worth"], 0.0);
        }
    }

    #[test]
    fn test_epf_sums_first_two_accounts_only() {
        let raw = json!({"epfDetails": [
            {"currentBalance": "100000"},
            {"currentBalance": 50000},
            {"currentBalance": 999999},
        ]});

        let summary = summarize_epf_details(&raw);
        assert_eq!(summary["total_accounts"], 3);
        assert_eq!(summary["total_balance"], 150000.0);
    }

    #[test]
    fn test_epf_skips_unparsable_balances() {
        let raw = json!({"epfDetails": [
            {"currentBalance": "n/a"},
            {"currentBalance": "2500.5"},
        ]});
        let summary = summarize_epf_details(&raw);
        assert_eq!(summary["total_balance"], 2500.5);
    }

    #[test]
    fn test_stock_sums_first_five_transactions_only() {
        let txns: Vec<Value> = (0..8)
            .map(|i| json!(["BUY", "2025-01-01", 10.0, 10.0, 100 * (i + 1)]))
            .collect();
        let raw = json!({"stockTransactions": txns});

        let summary = summarize_stock_transactions(&raw);
        assert_eq!(summary["total_transactions"], 8);
        // 100 + 200 + 300 + 400 + 500
        assert_eq!(summary["total_invested"], 1500.0);
    }

    #[test]
    fn test_stock_skips_short_and_malformed_rows() {
        let raw = json!({"stockTransactions": [
            ["BUY", "2025-01-01", 10.0, 10.0, "750.25"],
            ["BUY", "2025-01-02"],
            "not-a-row",
        ]});
        let summary = summarize_stock_transactions(&raw);
        assert_eq!(summary["total_transactions"], 3);
        assert_eq!(summary["total_invested"], 750.25);
    }

    #[test]
    fn test_summarize_bundle_passes_error_markers_through() {
        let mut bundle: FinancialBundle = BTreeMap::new();
        bundle.insert(DataKind::NetWorth, json!({"netWorth": []}));
        bundle.insert(
            DataKind::CreditReport,
            json!({"error": "Timeout fetching credit_report"}),
        );

        let summary = summarize_bundle(&bundle);
        assert_eq!(summary["net_worth"]["net_worth"], 0.0);
        assert_eq!(summary["credit_report"]["error"], "Timeout fetching credit_report");
        assert!(summary["generated_at"].is_string());
    }

    #[test]
    fn test_summarize_bundle_is_always_serializable() {
        let mut bundle: FinancialBundle = BTreeMap::new();
        for kind in DataKind::ALL {
            bundle.insert(kind, json!({"completely": {"wrong": ["shape", 1, null]}}));
        }

        let summary = summarize_bundle(&bundle);
        let encoded = serde_json::to_string(&summary).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(summary, decoded);
    }

    #[test]
    fn test_summarize_empty_bundle_still_stamped() {
        let summary = summarize_bundle(&BTreeMap::new());
        assert!(summary["generated_at"].is_string());
    }
}
