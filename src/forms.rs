//! Form drafts and the commands they produce for the record store.
//!
//! A draft holds raw text exactly as typed. Submitting it validates the text,
//! coerces amounts with [`parse_formatted_number`] and yields a
//! [`StoreCommand`]. Which record is being edited lives in an explicit
//! [`EditState`] owned by the caller.

use crate::error::{LedgerError, Result};
use crate::schema::{
    Asset, Collection, Goal, GoalType, Liability, RecordId, Transaction, TransactionType,
};
use crate::utils::{parse_formatted_number, parse_iso_date, today_iso};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A write for the record store to carry out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StoreCommand {
    /// Create a document (`id` is `None`) or update an existing one.
    Upsert {
        collection: Collection,
        id: Option<RecordId>,
        fields: Map<String, Value>,
    },
    Delete {
        collection: Collection,
        id: RecordId,
    },
}

impl StoreCommand {
    pub fn delete(collection: Collection, id: RecordId) -> Self {
        Self::Delete { collection, id }
    }

    pub fn collection(&self) -> Collection {
        match self {
            Self::Upsert { collection, .. } | Self::Delete { collection, .. } => *collection,
        }
    }
}

pub trait RecordDraft: Sized {
    type Record: Serialize;

    const COLLECTION: Collection;

    /// Field that receives the write time on every submit.
    const TIMESTAMP_FIELD: &'static str = "lastUpdated";

    fn from_record(record: &Self::Record) -> Self;

    fn record_id(record: &Self::Record) -> &RecordId;

    /// Validates the draft and builds the record it describes.
    fn build(&self, id: RecordId) -> Result<Self::Record>;

    /// Document fields for the store: the built record without its id, plus a
    /// write timestamp.
    fn to_fields(&self) -> Result<Map<String, Value>> {
        let record = self.build(RecordId::new(String::new()))?;
        let mut fields = match serde_json::to_value(&record)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        fields.remove("id");
        fields.insert(
            Self::TIMESTAMP_FIELD.to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Ok(fields)
    }
}

/// Tracks which record, if any, the open form is editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    editing: Option<RecordId>,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(&self) -> Option<&RecordId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Marks `record` as the edit target and returns a draft prefilled from it.
    pub fn begin_edit<D: RecordDraft>(&mut self, record: &D::Record) -> D {
        self.editing = Some(D::record_id(record).clone());
        D::from_record(record)
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Turns `draft` into an upsert against the current edit target.
    ///
    /// On success the edit target is cleared, ready for the next blank form. On
    /// a validation error the target is kept so the user can correct the draft.
    pub fn submit<D: RecordDraft>(&mut self, draft: &D) -> Result<StoreCommand> {
        let fields = draft.to_fields()?;
        Ok(StoreCommand::Upsert {
            collection: D::COLLECTION,
            id: self.editing.take(),
            fields,
        })
    }
}

fn required(value: &str, record: &'static str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingField { record, field });
    }
    Ok(trimmed.to_string())
}

fn required_date(value: &str, record: &'static str, field: &'static str) -> Result<String> {
    let value = required(value, record, field)?;
    parse_iso_date(&value)?;
    Ok(value)
}

fn optional_date(value: &str) -> Result<Option<String>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_iso_date(trimmed)?;
    Ok(Some(trimmed.to_string()))
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn amount_text(value: f64) -> String {
    value.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            kind: TransactionType::Expense,
            amount: String::new(),
            category: String::new(),
            description: String::new(),
            date: today_iso(),
        }
    }
}

impl RecordDraft for TransactionDraft {
    type Record = Transaction;

    const COLLECTION: Collection = Collection::Transactions;
    const TIMESTAMP_FIELD: &'static str = "timestamp";

    fn from_record(record: &Transaction) -> Self {
        Self {
            kind: record.kind,
            amount: amount_text(record.amount),
            category: record.category.clone(),
            description: record.description.clone().unwrap_or_default(),
            date: record.date.clone(),
        }
    }

    fn record_id(record: &Transaction) -> &RecordId {
        &record.id
    }

    fn build(&self, id: RecordId) -> Result<Transaction> {
        Ok(Transaction {
            id,
            kind: self.kind,
            amount: parse_formatted_number(&self.amount),
            category: required(&self.category, "transaction", "category")?,
            description: optional_text(&self.description),
            date: required_date(&self.date, "transaction", "date")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDraft {
    pub name: String,
    pub value: String,
    pub category: String,
    pub date: String,
}

impl Default for AssetDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            category: String::new(),
            date: today_iso(),
        }
    }
}

impl RecordDraft for AssetDraft {
    type Record = Asset;

    const COLLECTION: Collection = Collection::Assets;

    fn from_record(record: &Asset) -> Self {
        Self {
            name: record.name.clone(),
            value: amount_text(record.value),
            category: record.category.clone(),
            date: record.date_added.clone(),
        }
    }

    fn record_id(record: &Asset) -> &RecordId {
        &record.id
    }

    fn build(&self, id: RecordId) -> Result<Asset> {
        Ok(Asset {
            id,
            name: required(&self.name, "asset", "name")?,
            value: parse_formatted_number(&self.value),
            category: required(&self.category, "asset", "category")?,
            date_added: required_date(&self.date, "asset", "dateAdded")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilityDraft {
    pub name: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub due_date: String,
}

impl Default for LiabilityDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            category: String::new(),
            date: today_iso(),
            due_date: String::new(),
        }
    }
}

impl RecordDraft for LiabilityDraft {
    type Record = Liability;

    const COLLECTION: Collection = Collection::Liabilities;

    fn from_record(record: &Liability) -> Self {
        Self {
            name: record.name.clone(),
            amount: amount_text(record.amount),
            category: record.category.clone(),
            date: record.date_added.clone(),
            due_date: record.due_date.clone().unwrap_or_default(),
        }
    }

    fn record_id(record: &Liability) -> &RecordId {
        &record.id
    }

    fn build(&self, id: RecordId) -> Result<Liability> {
        Ok(Liability {
            id,
            name: required(&self.name, "liability", "name")?,
            amount: parse_formatted_number(&self.amount),
            category: required(&self.category, "liability", "category")?,
            date_added: required_date(&self.date, "liability", "dateAdded")?,
            due_date: optional_date(&self.due_date)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub due_date: String,
    pub kind: GoalType,
}

impl Default for GoalDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            target_amount: String::new(),
            current_amount: "0".to_string(),
            due_date: String::new(),
            kind: GoalType::Saving,
        }
    }
}

impl RecordDraft for GoalDraft {
    type Record = Goal;

    const COLLECTION: Collection = Collection::Goals;

    fn from_record(record: &Goal) -> Self {
        Self {
            name: record.name.clone(),
            target_amount: amount_text(record.target_amount),
            current_amount: amount_text(record.current_amount),
            due_date: record.due_date.clone().unwrap_or_default(),
            kind: record.kind,
        }
    }

    fn record_id(record: &Goal) -> &RecordId {
        &record.id
    }

    fn build(&self, id: RecordId) -> Result<Goal> {
        Ok(Goal {
            id,
            name: required(&self.name, "goal", "name")?,
            target_amount: parse_formatted_number(&self.target_amount),
            current_amount: parse_formatted_number(&self.current_amount),
            due_date: optional_date(&self.due_date)?,
            kind: self.kind,
        })
    }
}
