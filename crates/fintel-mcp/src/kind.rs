//! The six financial data kinds served by the external provider

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of financial record held by the data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// Net worth snapshot
    NetWorth,
    /// Bank account transactions
    BankTransactions,
    /// Credit bureau report
    CreditReport,
    /// Employee provident fund details
    EpfDetails,
    /// Mutual fund transactions
    MfTransactions,
    /// Stock transactions
    StockTransactions,
}

impl DataKind {
    /// All six kinds, in a stable order
    pub const ALL: [DataKind; 6] = [
        DataKind::NetWorth,
        DataKind::BankTransactions,
        DataKind::CreditReport,
        DataKind::EpfDetails,
        DataKind::MfTransactions,
        DataKind::StockTransactions,
    ];

    /// Wire name sent as `tool_name` and used as the summary key
    pub fn as_str(self) -> &'static str {
        match self {
            DataKind::NetWorth => "net_worth",
            DataKind::BankTransactions => "bank_transactions",
            DataKind::CreditReport => "credit_report",
            DataKind::EpfDetails => "epf_details",
            DataKind::MfTransactions => "mf_transactions",
            DataKind::StockTransactions => "stock_transactions",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
