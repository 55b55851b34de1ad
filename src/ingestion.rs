use crate::error::Result;
use crate::schema::{Collection, LedgerSnapshot};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One document as delivered by the record store: its key plus field data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub id: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl StoreDocument {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Field data with the document key merged in as `id`. The key wins over any
    /// `id` field stored in the data.
    fn into_record_value(self) -> Value {
        let mut fields = self.data;
        fields.insert("id".to_string(), Value::String(self.id));
        Value::Object(fields)
    }
}

/// Outcome of replacing one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub accepted: usize,
    /// Document id and the reason it could not be read
    pub skipped: Vec<(String, String)>,
}

/// A snapshot as it arrives on the wire, before each record is read on its own.
#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    transactions: Vec<Value>,
    #[serde(default)]
    assets: Vec<Value>,
    #[serde(default)]
    liabilities: Vec<Value>,
    #[serde(default)]
    goals: Vec<Value>,
}

/// Key used to name a raw record in warnings: its `id` when it has a string
/// one, otherwise its position in the collection.
fn raw_record_key(index: usize, value: &Value) -> String {
    match value.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => format!("#{}", index),
    }
}

fn keyed(values: Vec<Value>) -> impl Iterator<Item = (String, Value)> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| (raw_record_key(index, &value), value))
}

impl LedgerSnapshot {
    /// Parses a snapshot document.
    ///
    /// Only a document whose shape is wrong (not an object, or a collection
    /// that is not an array) is an error. A record that cannot be read, such as
    /// one with an unknown transaction type, is skipped with a warning and the
    /// rest of its collection is kept.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        let mut report = IngestReport::default();

        let transactions =
            decode_records(Collection::Transactions, keyed(raw.transactions), &mut report);
        let assets = decode_records(Collection::Assets, keyed(raw.assets), &mut report);
        let liabilities =
            decode_records(Collection::Liabilities, keyed(raw.liabilities), &mut report);
        let goals = decode_records(Collection::Goals, keyed(raw.goals), &mut report);

        let snapshot = Self {
            transactions,
            assets,
            liabilities,
            goals,
        };

        debug!(
            "Loaded snapshot with {} transactions, {} assets, {} liabilities, {} goals ({} skipped)",
            snapshot.transactions.len(),
            snapshot.assets.len(),
            snapshot.liabilities.len(),
            snapshot.goals.len(),
            report.skipped.len()
        );
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces `collection` wholesale with `documents`, the way each store
    /// update delivers the full current contents of a collection.
    ///
    /// Documents that cannot be read as records (for example an unknown
    /// transaction type) are left out and listed in the report; the rest of the
    /// collection is still applied.
    pub fn replace_collection(
        &mut self,
        collection: Collection,
        documents: Vec<StoreDocument>,
    ) -> IngestReport {
        let mut report = IngestReport::default();
        let records = documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc.into_record_value()));

        match collection {
            Collection::Transactions => {
                self.transactions = decode_records(collection, records, &mut report)
            }
            Collection::Assets => self.assets = decode_records(collection, records, &mut report),
            Collection::Liabilities => {
                self.liabilities = decode_records(collection, records, &mut report)
            }
            Collection::Goals => self.goals = decode_records(collection, records, &mut report),
        }

        debug!(
            "Replaced {:?}: {} accepted, {} skipped",
            collection,
            report.accepted,
            report.skipped.len()
        );
        report
    }
}

fn decode_records<T: DeserializeOwned>(
    collection: Collection,
    values: impl IntoIterator<Item = (String, Value)>,
    report: &mut IngestReport,
) -> Vec<T> {
    let mut records = Vec::new();

    for (id, value) in values {
        match serde_json::from_value::<T>(value) {
            Ok(record) => {
                records.push(record);
                report.accepted += 1;
            }
            Err(e) => {
                warn!("Skipping {:?} record {}: {}", collection, id, e);
                report.skipped.push((id, e.to_string()));
            }
        }
    }

    records
}
