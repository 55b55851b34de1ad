use crate::utils::{coerce_number, finite_or_zero};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Store-assigned identifier. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    #[schemars(description = "Money received: salary, interest, gifts")]
    Income,

    #[schemars(description = "Money spent: rent, food, transport")]
    Expense,
}

impl Default for TransactionType {
    fn default() -> Self {
        Self::Expense
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    #[schemars(description = "Accumulate cash savings toward a target")]
    Saving,

    #[schemars(description = "Grow an investment position toward a target")]
    Investment,

    #[schemars(description = "Pay down a debt; the target is the amount to repay")]
    DebtRepayment,
}

impl Default for GoalType {
    fn default() -> Self {
        Self::Saving
    }
}

/// The four record collections handled by the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Transactions,
    Assets,
    Liabilities,
    Goals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,

    #[serde(rename = "type")]
    #[schemars(description = "Whether the transaction is income or an expense")]
    pub kind: TransactionType,

    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "f64")]
    #[schemars(
        description = "Non-negative amount in currency units. Strings are parsed leniently; unusable values count as 0."
    )]
    pub amount: f64,

    #[serde(default)]
    #[schemars(description = "Grouping key, used verbatim (case-sensitive)")]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    #[schemars(description = "Date in YYYY-MM-DD format. The first 7 characters form the month key.")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "f64")]
    #[schemars(description = "Current value in currency units")]
    pub value: f64,

    #[serde(default)]
    pub category: String,

    #[serde(default, alias = "date")]
    #[schemars(description = "Date the asset was recorded, YYYY-MM-DD")]
    pub date_added: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "f64")]
    #[schemars(description = "Outstanding amount in currency units")]
    pub amount: f64,

    #[serde(default)]
    pub category: String,

    #[serde(default, alias = "date")]
    #[schemars(description = "Date the liability was recorded, YYYY-MM-DD")]
    pub date_added: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "f64")]
    #[schemars(description = "Amount to reach. Zero means progress is not applicable.")]
    pub target_amount: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    #[schemars(with = "f64")]
    #[schemars(description = "Amount reached so far")]
    pub current_amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: GoalType,
}

/// Everything the engine reads: one immutable copy of the four collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LedgerSnapshot {
    #[serde(default)]
    #[schemars(description = "Income and expense records, in any order")]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub assets: Vec<Asset>,

    #[serde(default)]
    pub liabilities: Vec<Liability>,

    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl LedgerSnapshot {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(LedgerSnapshot)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Accepts JSON numbers, numeric strings, `null` or anything else, and always
/// produces a finite number. Matches `parseFloat(x) || 0` on the client.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().map(finite_or_zero).unwrap_or(0.0),
        Value::String(s) => coerce_number(&s),
        _ => 0.0,
    })
}
