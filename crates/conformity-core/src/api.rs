//! JSON bodies exchanged over the HTTP endpoints.
//!
//! Request fields are optional at the serde level so that a missing field and
//! an empty one can both be reported as the same client error by the handler,
//! instead of surfacing as a deserialisation failure. The request bodies only
//! deserialise from a JSON object; serde's derived struct visitor would also
//! take a positional array.

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /get_suggestions`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuggestionRequest {
    pub input: Option<String>,
}

impl<'de> Deserialize<'de> for SuggestionRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            #[serde(default)]
            input: Option<String>,
        }

        let Fields { input } = object_only(deserializer)?;
        Ok(Self { input })
    }
}

impl SuggestionRequest {
    /// The prompt, if present and not blank.
    pub fn prompt(&self) -> Option<&str> {
        non_blank(self.input.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

/// Body of `POST /check_compliance`.
///
/// `doc_reference` is either raw text or, when the server has a reference
/// directory configured, the name of a `.txt` / `.pdf` file inside it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComplianceRequest {
    pub doc_reference: Option<String>,
    pub doc_submitted: Option<String>,
}

impl<'de> Deserialize<'de> for ComplianceRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            #[serde(default)]
            doc_reference: Option<String>,
            #[serde(default)]
            doc_submitted: Option<String>,
        }

        let Fields {
            doc_reference,
            doc_submitted,
        } = object_only(deserializer)?;
        Ok(Self {
            doc_reference,
            doc_submitted,
        })
    }
}

impl ComplianceRequest {
    /// Both documents, or `None` if either is missing or blank.
    pub fn documents(&self) -> Option<(&str, &str)> {
        let reference = non_blank(self.doc_reference.as_deref())?;
        let submitted = non_blank(self.doc_submitted.as_deref())?;
        Some((reference, submitted))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceResponse {
    pub conformity_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub scorer: String,
}

/// Every error response carries a single human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Deserialise `T` through `deserialize_map`, so sequences are an invalid type.
fn object_only<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct ObjectVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a JSON object")
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
            T::deserialize(MapAccessDeserializer::new(map))
        }
    }

    deserializer.deserialize_map(ObjectVisitor(PhantomData))
}
