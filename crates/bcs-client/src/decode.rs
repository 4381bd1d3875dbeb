//! Best-effort record decoding
//!
//! Bulk records are decoded one field at a time. A field that fails to
//! decode (typically a date in an unexpected layout) is reported and left as
//! `None`; every other field is still populated. This is what lets the
//! scanner keep a partially decoded record in its bucket instead of dropping
//! it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::RecordKind;

/// Why a single record could not be fully decoded
#[derive(Debug, Error)]
pub enum FieldDecodeError {
    /// One named field had a value of the wrong shape
    #[error("field {field:?}: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The record body was not a JSON object at all
    #[error("record body: {0}")]
    Body(#[source] serde_json::Error),
}

impl FieldDecodeError {
    /// Wire name of the failing field, if the failure was field-specific
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FieldDecodeError::Field { field, .. } => Some(field),
            FieldDecodeError::Body(_) => None,
        }
    }
}

/// Pulls typed fields out of a decoded JSON object, collecting failures.
pub struct FieldReader {
    object: Map<String, Value>,
    errors: Vec<FieldDecodeError>,
}

impl FieldReader {
    pub fn new(object: Map<String, Value>) -> Self {
        Self {
            object,
            errors: Vec::new(),
        }
    }

    /// Take `field` and decode it as `T`.
    ///
    /// Absent and `null` both yield `None`. A decode failure is recorded and
    /// also yields `None`.
    pub fn take<T: DeserializeOwned>(&mut self, field: &'static str) -> Option<T> {
        match self.object.remove(field)? {
            Value::Null => None,
            value => match serde_json::from_value(value) {
                Ok(decoded) => Some(decoded),
                Err(source) => {
                    self.errors.push(FieldDecodeError::Field { field, source });
                    None
                },
            },
        }
    }

    pub fn into_errors(self) -> Vec<FieldDecodeError> {
        self.errors
    }
}

/// A record kind that can be routed from the bulk stream.
pub trait BulkRecord: Default + Serialize + Sized {
    /// Discriminator value identifying this record kind
    const KIND: RecordKind;

    /// Build the record from whatever fields decode cleanly.
    fn read_fields(reader: &mut FieldReader) -> Self;
}

/// Decode one raw line as `T`, returning the (possibly partial) record and
/// any field failures. Unknown keys, including the discriminator, are ignored.
pub fn decode_record<T: BulkRecord>(line: &[u8]) -> (T, Vec<FieldDecodeError>) {
    match serde_json::from_slice::<Map<String, Value>>(line) {
        Ok(object) => {
            let mut reader = FieldReader::new(object);
            let record = T::read_fields(&mut reader);
            (record, reader.into_errors())
        },
        Err(err) => (T::default(), vec![FieldDecodeError::Body(err)]),
    }
}

/// Declares a bulk record struct whose fields are all optional.
///
/// Each field is listed with its wire name. The generated struct serializes
/// with those names, omits absent fields, and implements [`BulkRecord`].
macro_rules! bulk_record {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:expr, {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty = $wire:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(rename = $wire, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::decode::BulkRecord for $name {
            const KIND: $crate::models::RecordKind = $kind;

            fn read_fields(reader: &mut $crate::decode::FieldReader) -> Self {
                Self {
                    $( $field: reader.take($wire), )*
                }
            }
        }
    };
}

pub(crate) use bulk_record;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reader(value: Value) -> FieldReader {
        match value {
            Value::Object(map) => FieldReader::new(map),
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_absent_and_null_are_none() {
        let mut r = reader(json!({ "present": 0, "nothing": null }));
        assert_eq!(r.take::<i64>("present"), Some(0));
        assert_eq!(r.take::<i64>("nothing"), None);
        assert_eq!(r.take::<i64>("missing"), None);
        assert!(r.into_errors().is_empty());
    }

    #[test]
    fn test_wrong_type_is_recorded_and_others_survive() {
        let mut r = reader(json!({ "count": "seven", "name": "edge-1", "up": false }));
        assert_eq!(r.take::<i64>("count"), None);
        assert_eq!(r.take::<String>("name").as_deref(), Some("edge-1"));
        assert_eq!(r.take::<bool>("up"), Some(false));

        let errors = r.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), Some("count"));
    }

    #[test]
    fn test_body_that_is_not_an_object() {
        let (record, errors) = decode_record::<crate::models::TrackSmupieRecommendation>(b"[1]");
        assert_eq!(record, Default::default());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field().is_none());
    }
}
