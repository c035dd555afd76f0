//! Document identifier conventions.
//!
//! Stored documents are keyed either by a store-assigned ObjectId or by a
//! plain integer (seeded data uses integer keys). [`DocId`] carries that
//! distinction through filters and typed models; [`IdParam`] accepts either
//! shape from request bodies and [`IdValue`] emits the canonical wire form:
//! ObjectIds as their 24-hex string, integers untouched.

use bson::{Bson, Document, oid::ObjectId};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// A document key as stored: ObjectId or integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocId {
    Oid(ObjectId),
    Int(i64),
}

impl DocId {
    pub fn new_oid() -> Self {
        DocId::Oid(ObjectId::new())
    }

    /// The JSON-facing form: hex string for references, number for integers.
    pub fn to_wire(&self) -> IdValue {
        match self {
            DocId::Oid(oid) => IdValue::Text(oid.to_hex()),
            DocId::Int(n) => IdValue::Int(*n),
        }
    }
}

impl From<ObjectId> for DocId {
    fn from(oid: ObjectId) -> Self {
        DocId::Oid(oid)
    }
}

impl From<DocId> for Bson {
    fn from(id: DocId) -> Self {
        match id {
            DocId::Oid(oid) => Bson::ObjectId(oid),
            DocId::Int(n) => Bson::Int64(n),
        }
    }
}

/// Resolves a path segment in a context that accepts either key shape
/// (posts, categories): 24 hex digits become an ObjectId, anything that
/// parses as an integer becomes an integer key.
pub fn resolve_doc_id(segment: &str) -> Result<DocId, ApiError> {
    if let Ok(oid) = ObjectId::parse_str(segment) {
        return Ok(DocId::Oid(oid));
    }
    segment
        .parse::<i64>()
        .map(DocId::Int)
        .map_err(|_| ApiError::InvalidIdentifier)
}

/// Resolves a path segment in a reference-only context
/// (users, comments, likes, follows).
pub fn resolve_object_id(segment: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(segment).map_err(|_| ApiError::InvalidIdentifier)
}

/// A reference field as it arrives in a request body: JSON string or number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Int(i64),
    Text(String),
}

impl IdParam {
    /// Parses in a reference-only context.
    pub fn as_reference(&self, field: &'static str) -> Result<ObjectId, ApiError> {
        match self {
            IdParam::Text(s) => ObjectId::parse_str(s).map_err(|_| ApiError::InvalidReference(field)),
            IdParam::Int(_) => Err(ApiError::InvalidReference(field)),
        }
    }

    /// Parses in an either-form context.
    pub fn as_doc_id(&self, field: &'static str) -> Result<DocId, ApiError> {
        match self {
            IdParam::Text(s) => {
                if let Ok(oid) = ObjectId::parse_str(s) {
                    Ok(DocId::Oid(oid))
                } else {
                    s.parse::<i64>()
                        .map(DocId::Int)
                        .map_err(|_| ApiError::InvalidReference(field))
                }
            }
            IdParam::Int(n) => Ok(DocId::Int(*n)),
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, IdParam::Text(s) if s.trim().is_empty())
    }
}

/// A document key on the wire: string for references, number for integers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Int(i64),
}

/// Recursively normalizes a BSON value for output: ObjectIds to hex strings,
/// datetimes to ISO-8601, numbers and the rest passed through. Used for
/// aggregation and projection results that have no typed model.
pub fn bson_to_json(value: Bson) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

pub fn document_to_json(doc: Document) -> serde_json::Value {
    serde_json::Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    const HEX: &str = "64f0a2b3c4d5e6f708192a3b";

    #[test]
    fn path_segments_resolve_to_either_form() {
        assert_eq!(
            resolve_doc_id(HEX).unwrap(),
            DocId::Oid(ObjectId::parse_str(HEX).unwrap())
        );
        assert_eq!(resolve_doc_id("42").unwrap(), DocId::Int(42));
        assert!(resolve_doc_id("not-an-id").is_err());
        assert!(resolve_doc_id("").is_err());
    }

    #[test]
    fn hex_resolution_is_case_insensitive() {
        let upper = HEX.to_uppercase();
        assert_eq!(resolve_doc_id(&upper).unwrap(), resolve_doc_id(HEX).unwrap());
    }

    #[test]
    fn reference_only_contexts_reject_integers() {
        assert!(resolve_object_id(HEX).is_ok());
        assert!(resolve_object_id("42").is_err());
        assert!(resolve_object_id("zz0a2b3c4d5e6f708192a3bq").is_err());
    }

    #[test]
    fn body_params_parse_by_context() {
        let hex = IdParam::Text(HEX.to_string());
        let numeric_text = IdParam::Text("7".to_string());
        let number = IdParam::Int(7);

        assert!(hex.as_reference("user_id").is_ok());
        assert!(numeric_text.as_reference("user_id").is_err());
        assert!(number.as_reference("user_id").is_err());

        assert_eq!(numeric_text.as_doc_id("user_id").unwrap(), DocId::Int(7));
        assert_eq!(number.as_doc_id("user_id").unwrap(), DocId::Int(7));
        assert!(IdParam::Text("garbage".into()).as_doc_id("user_id").is_err());
    }

    #[test]
    fn doc_id_round_trips_through_bson() {
        let oid = ObjectId::parse_str(HEX).unwrap();
        for id in [DocId::Oid(oid), DocId::Int(99)] {
            let bson = bson::serialize_to_bson(&id).unwrap();
            let back: DocId = bson::deserialize_from_bson(bson).unwrap();
            assert_eq!(back, id);
        }
    }

    #[test]
    fn wire_form_stringifies_references_only() {
        let oid = ObjectId::parse_str(HEX).unwrap();
        assert_eq!(DocId::Oid(oid).to_wire(), IdValue::Text(HEX.to_string()));
        assert_eq!(DocId::Int(5).to_wire(), IdValue::Int(5));
    }

    #[test]
    fn normalizer_rewrites_nested_references_and_dates() {
        let oid = ObjectId::parse_str(HEX).unwrap();
        let date = bson::DateTime::from_millis(1_704_067_200_000); // 2024-01-01T00:00:00Z
        let doc = doc! {
            "_id": oid,
            "count": 3_i32,
            "nested": { "user_id": oid, "date": date },
            "tags": [oid, 1_i64],
        };

        let json = document_to_json(doc);
        assert_eq!(json["_id"], serde_json::json!(HEX));
        assert_eq!(json["count"], serde_json::json!(3));
        assert_eq!(json["nested"]["user_id"], serde_json::json!(HEX));
        assert_eq!(
            json["nested"]["date"],
            serde_json::json!("2024-01-01T00:00:00.000Z")
        );
        assert_eq!(json["tags"][0], serde_json::json!(HEX));
        assert_eq!(json["tags"][1], serde_json::json!(1));
    }
}
