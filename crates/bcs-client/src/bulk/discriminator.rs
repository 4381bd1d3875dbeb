//! Discriminator-only decoding of a bulk line
//!
//! Reads the `type` key of a JSON object and skips every other value without
//! building it. The full record is decoded in a separate pass once the kind
//! is known.

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

const TYPE_FIELD: &str = "type";

struct Discriminator(Option<String>);

impl<'de> Deserialize<'de> for Discriminator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = Discriminator;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Discriminator, A::Error> {
                let mut kind = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == TYPE_FIELD {
                        // Last occurrence wins, as with any other JSON key.
                        kind = map.next_value::<Option<String>>()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(Discriminator(kind))
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}

/// Return the discriminator of one raw JSON line.
///
/// A missing or `null` `type` yields an empty string. Anything that is not a
/// single well-formed JSON object, or a `type` that is not a string, is an
/// error.
pub fn decode_kind(line: &[u8]) -> serde_json::Result<String> {
    let Discriminator(kind) = serde_json::from_slice(line)?;
    Ok(kind.unwrap_or_default())
}
