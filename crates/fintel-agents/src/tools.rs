//! Callable tools exposed to the model backend
//!
//! The core carries exactly one capability: a market-performance lookup for
//! ticker symbols. It is a deterministic table keyed by symbol substrings,
//! not a live feed — the agent layer only needs stable, explainable numbers
//! to ground strategy output.

use fintel_llm::tools::schema;
use fintel_llm::{CallableTool, FunctionDeclaration, LlmError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Benchmark index always included in the result
const BENCHMARK_NAME: &str = "NIFTY 50";
const BENCHMARK_RETURN: f64 = 12.0;

/// Annualized return assumed for symbols with no table match
const DEFAULT_RETURN: f64 = 13.0;

// Substring match table: (needle, annualized return %)
const RETURNS_TABLE: [(&str, f64); 2] = [("RELIANCE", 15.5), ("TCS", 11.0)];

#[derive(Debug, Deserialize)]
struct MarketPerformanceParams {
    #[serde(default)]
    stock_symbols: Vec<String>,
}

/// Deterministic market-performance lookup tool
#[derive(Debug, Default)]
pub struct MarketPerformanceTool;

impl MarketPerformanceTool {
    /// Create the tool
    pub fn new() -> Self {
        Self
    }

    fn lookup(symbol: &str) -> f64 {
        let upper = symbol.to_uppercase();
        RETURNS_TABLE
            .iter()
            .find(|(needle, _)| upper.contains(needle))
            .map_or(DEFAULT_RETURN, |(_, pct)| *pct)
    }
}

#[async_trait]
impl CallableTool for MarketPerformanceTool {
    async fn call(&self, args: Value) -> fintel_llm::Result<Value> {
        let params: MarketPerformanceParams = serde_json::from_value(args)
            .map_err(|e| LlmError::ToolError(format!("invalid arguments: {e}")))?;

        let mut performance = Map::new();
        performance.insert(BENCHMARK_NAME.to_string(), json!(BENCHMARK_RETURN));
        for symbol in &params.stock_symbols {
            performance.insert(symbol.clone(), json!(Self::lookup(symbol)));
        }

        Ok(Value::Object(performance))
    }

    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration::new(
            self.name(),
            "Look up annualized market performance (percent returns) for a list of stock ticker symbols, alongside the NIFTY 50 benchmark.",
            schema::object(
                json!({
                    "stock_symbols": schema::array(
                        "Ticker symbols to look up",
                        schema::string("A stock ticker symbol"),
                    ),
                }),
                vec!["stock_symbols"],
            ),
        )
    }

    fn name(&self) -> &str {
        "get_market_performance"
    }
}
