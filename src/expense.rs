// 🧾 Expense Records - record type, inbound payload, identifier derivation

use serde::de::{self, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

// ============================================================================
// EXPENSE RECORD
// ============================================================================

/// A recorded expense, stored and served in the same JSON shape:
/// `{"id", "valor", "data", "desc"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Content-derived identifier, see [`derive_id`]
    pub id: String,

    #[serde(rename = "valor")]
    pub amount: f64,

    #[serde(rename = "data")]
    pub date: String,

    #[serde(rename = "desc")]
    pub description: String,
}

impl Expense {
    /// Build a record, deriving its identifier from date and description.
    pub fn new(amount: f64, date: impl Into<String>, description: impl Into<String>) -> Self {
        let date = date.into();
        let description = description.into();
        Self {
            id: derive_id(&date, &description),
            amount,
            date,
            description,
        }
    }
}

/// Stable identifier for a record: lowercase hex SHA-256 of `date` followed by `description`.
///
/// Two records sharing date and description get the same identifier regardless of amount.
pub fn derive_id(date: &str, description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.as_bytes());
    hasher.update(description.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// INBOUND PAYLOAD
// ============================================================================

/// Body of `POST /expenses`.
///
/// Missing fields fall back to zero values so that the presence checks in
/// [`NewExpense::validate`] report them. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewExpense {
    #[serde(rename = "valor")]
    pub amount: f64,

    #[serde(rename = "data")]
    pub date: String,

    #[serde(rename = "desc")]
    pub description: String,
}

/// Presence check failures, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Amount,
    Date,
    Description,
}

impl MissingField {
    pub fn message(&self) -> &'static str {
        match self {
            MissingField::Amount => "amount required",
            MissingField::Date => "date required",
            MissingField::Description => "description required",
        }
    }
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Error for a JSON value that should have been an object.
///
/// Derived struct decoding also accepts arrays positionally, so callers check the
/// value kind before handing it to serde.
pub(crate) fn not_an_object(value: &Value) -> serde_json::Error {
    let unexpected = match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s.as_str()),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    };
    <serde_json::Error as de::Error>::invalid_type(unexpected, &"a JSON object")
}

impl NewExpense {
    /// Decode a request body. Only a JSON object is accepted, with `null` read as an
    /// empty object. A repeated key keeps its last value.
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Ok(Self::default()),
            object @ Value::Object(_) => serde_json::from_value(object),
            other => Err(not_an_object(&other)),
        }
    }

    /// First failing presence check wins: amount, then date, then description.
    pub fn validate(&self) -> Result<(), MissingField> {
        if self.amount == 0.0 {
            return Err(MissingField::Amount);
        }
        if self.date.is_empty() {
            return Err(MissingField::Date);
        }
        if self.description.is_empty() {
            return Err(MissingField::Description);
        }
        Ok(())
    }

    /// Validate and turn the payload into a stored record.
    pub fn into_expense(self) -> Result<Expense, MissingField> {
        self.validate()?;
        Ok(Expense::new(self.amount, self.date, self.description))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(amount: f64, date: &str, description: &str) -> NewExpense {
        NewExpense {
            amount,
            date: date.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_derive_id_is_deterministic() {
        let id1 = derive_id("2024-01-01", "coffee");
        let id2 = derive_id("2024-01-01", "coffee");

        assert_eq!(id1, id2, "Same inputs should produce same id");
        assert_eq!(id1.len(), 64, "SHA-256 hash should be 64 hex characters");
        assert!(id1.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_derive_id_hashes_concatenation() {
        // Known SHA-256 of the empty string
        assert_eq!(
            derive_id("", ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        // Only the concatenation matters, not where the split falls
        assert_eq!(derive_id("2024-01-01", "coffee"), derive_id("2024-01-01coffee", ""));
        assert_ne!(derive_id("2024-01-01", "coffee"), derive_id("2024-01-02", "coffee"));
    }

    #[test]
    fn test_same_date_and_description_collide() {
        let a = Expense::new(10.0, "2024-01-01", "lunch");
        let b = Expense::new(99.0, "2024-01-01", "lunch");
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_validate_order() {
        assert_eq!(payload(0.0, "", "").validate(), Err(MissingField::Amount));
        assert_eq!(payload(1.0, "", "").validate(), Err(MissingField::Date));
        assert_eq!(payload(1.0, "2024-01-01", "").validate(), Err(MissingField::Description));
        assert_eq!(payload(-3.5, "2024-01-01", "refund").validate(), Ok(()));
    }

    #[test]
    fn test_payload_defaults_and_ignores_id() {
        let parsed: NewExpense = serde_json::from_str(r#"{"id": "client-id", "data": "x"}"#).unwrap();
        assert_eq!(parsed.amount, 0.0);
        assert_eq!(parsed.date, "x");
        assert!(parsed.description.is_empty());

        let wrong_type = NewExpense::from_json(br#"{"valor": "ten"}"#);
        assert!(wrong_type.is_err());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(NewExpense::from_json(b"[]").is_err());
        assert!(NewExpense::from_json(br#"[5, "2024-01-01", "coffee"]"#).is_err());
        assert!(NewExpense::from_json(br#""coffee""#).is_err());
        assert!(NewExpense::from_json(b"42").is_err());
        assert!(NewExpense::from_json(b"true").is_err());
    }

    #[test]
    fn test_from_json_null_and_repeated_keys() {
        let empty = NewExpense::from_json(b"null").unwrap();
        assert_eq!(empty.validate(), Err(MissingField::Amount));

        let repeated =
            NewExpense::from_json(br#"{"valor": 1, "data": "d", "desc": "x", "valor": 2}"#).unwrap();
        assert_eq!(repeated.amount, 2.0, "Last value of a repeated key should win");
    }

    #[test]
    fn test_expense_json_shape() {
        let expense = payload(42.50, "2024-01-01", "coffee").into_expense().unwrap();
        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(json["id"], derive_id("2024-01-01", "coffee"));
        assert_eq!(json["valor"], 42.5);
        assert_eq!(json["data"], "2024-01-01");
        assert_eq!(json["desc"], "coffee");
    }
}
