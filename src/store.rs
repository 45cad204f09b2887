use serde::{Deserialize, Serialize};

/// A flat persistence record for one saved sheet.
///
/// This is the shape that round-trips through a store: the raw statement
/// text, the JSON-serialized input bindings, a display name, a pinned
/// flag, and the partition/row keys the backing table is addressed by.
/// Field names serialize in camelCase to match the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// The raw sheet text.
    pub expression:    String,
    /// The input bindings, as a JSON-serialized name-to-raw-value mapping.
    pub variables:     String,
    /// The user-facing display name of the saved sheet.
    pub name:          String,
    /// Whether the record is pinned in listings.
    pub pinned:        bool,
    /// The namespace key, supplied by an [`IdentityProvider`].
    pub partition_key: String,
    /// The key of the record within its partition.
    pub row_key:       String,
}

#[derive(Debug)]
/// Represents failures raised by a store implementation.
pub enum StoreError {
    /// The backing store reported a failure.
    Backend {
        /// Description of the backend failure.
        message: String,
    },
    /// A record payload could not be serialized or deserialized.
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend { message } => write!(f, "Store backend error: {message}"),
            Self::Serialization { message } => {
                write!(f, "Store serialization error: {message}")
            },
        }
    }
}

impl std::error::Error for StoreError {}

/// A key-value store of sheet records.
///
/// Implementations cover both a local history list and a remote saved-sheet
/// table; the engine only supplies and consumes plain records and takes no
/// part in the transport. `put` is an upsert: writing a record whose
/// (partition, row) pair already exists replaces the stored record.
pub trait Store {
    /// Lists all records visible to this store.
    fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Fetches the record with the given keys, if present.
    fn get(&self, partition_key: &str, row_key: &str) -> Result<Option<Record>, StoreError>;

    /// Inserts or replaces a record.
    fn put(&mut self, record: Record) -> Result<(), StoreError>;

    /// Removes the record with the given keys. Removing an absent record
    /// is not an error.
    fn delete(&mut self, partition_key: &str, row_key: &str) -> Result<(), StoreError>;
}

/// Yields the stable partition key saved records are namespaced under.
///
/// In a multi-user deployment this is backed by the authentication layer
/// and returns a per-user account key; the engine consumes it only to
/// address records.
pub trait IdentityProvider {
    /// The partition key for the current user.
    fn partition_key(&self) -> String;
}

/// An identity provider that always yields the same fixed key.
///
/// Suitable for single-user use and for tests.
pub struct FixedIdentity(pub String);

impl IdentityProvider for FixedIdentity {
    fn partition_key(&self) -> String {
        self.0.clone()
    }
}

/// An in-memory [`Store`], used as the reference implementation in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl Store for MemoryStore {
    fn list(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.records.clone())
    }

    fn get(&self, partition_key: &str, row_key: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.records
               .iter()
               .find(|r| r.partition_key == partition_key && r.row_key == row_key)
               .cloned())
    }

    fn put(&mut self, record: Record) -> Result<(), StoreError> {
        let existing = self.records
                           .iter()
                           .position(|r| {
                               r.partition_key == record.partition_key
                               && r.row_key == record.row_key
                           });

        match existing {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }

        Ok(())
    }

    fn delete(&mut self, partition_key: &str, row_key: &str) -> Result<(), StoreError> {
        self.records
            .retain(|r| !(r.partition_key == partition_key && r.row_key == row_key));
        Ok(())
    }
}

/// Hashes a display name into the row key used for save-by-name records.
///
/// Classic polynomial rolling hash: `hash = hash * 31 + code_unit` over the
/// UTF-16 code units of the name, wrapped to a 32-bit signed integer and
/// stringified. Deterministic, so re-saving under the same display name
/// addresses the same record.
///
/// # Example
/// ```
/// use reckon::store::name_hash;
///
/// assert_eq!(name_hash("abc"), "96354");
/// assert_eq!(name_hash(""), "0");
/// ```
#[must_use]
pub fn name_hash(name: &str) -> String {
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = hash.wrapping_shl(5)
                   .wrapping_sub(hash)
                   .wrapping_add(i32::from(unit));
    }
    hash.to_string()
}
