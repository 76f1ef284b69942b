//! JSON and YAML documents.
//!
//! A document holds either one `VSphereFailureDomain` or one
//! `VSphereFailureDomainList`. YAML input may hold several `---`-separated
//! documents. Decoding flattens everything into resources in input order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{FailureDomainList, FailureDomainResource, SchemaError, API_VERSION, KIND, LIST_KIND};

/// Document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Format::Json),
            Some("yaml") | Some("yml") => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Decodes resources from input in the given format.
pub fn decode(input: &str, format: Format) -> Result<Vec<FailureDomainResource>, SchemaError> {
    match format {
        Format::Json => decode_json(input),
        Format::Yaml => decode_yaml(input),
    }
}

/// Decodes a single JSON document.
pub fn decode_json(input: &str) -> Result<Vec<FailureDomainResource>, SchemaError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    decode_value(value)
}

/// Decodes a stream of YAML documents. Empty documents are skipped.
pub fn decode_yaml(input: &str) -> Result<Vec<FailureDomainResource>, SchemaError> {
    let mut resources = Vec::new();
    let values = yaml_values(input)?;
    let documents = values.len();
    for value in values {
        resources.extend(decode_value(value)?);
    }

    debug!(documents, resources = resources.len(), "decoded YAML stream");
    Ok(resources)
}

/// Resources found in input that may also hold documents of other kinds.
#[derive(Debug, Default)]
pub struct Decoded {
    pub resources: Vec<FailureDomainResource>,
    /// Well-formed documents of another kind or apiVersion.
    pub skipped: usize,
}

/// Like [`decode`], but skips foreign documents one at a time instead of
/// failing the whole input. Malformed documents are still errors.
pub fn decode_lenient(input: &str, format: Format) -> Result<Decoded, SchemaError> {
    let values = match format {
        Format::Json => vec![serde_json::from_str(input)?],
        Format::Yaml => yaml_values(input)?,
    };

    let mut decoded = Decoded::default();
    for value in values {
        match decode_value(value) {
            Ok(resources) => decoded.resources.extend(resources),
            Err(e) if e.is_foreign_document() => {
                debug!(reason = %e, "skipping foreign document");
                decoded.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(decoded)
}

/// Parses every non-empty document of a YAML stream.
fn yaml_values(input: &str) -> Result<Vec<serde_json::Value>, SchemaError> {
    let mut values = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let value = serde_json::Value::deserialize(document).map_err(|source| {
            SchemaError::Yaml {
                document: index + 1,
                source,
            }
        })?;
        if !value.is_null() {
            values.push(value);
        }
    }
    Ok(values)
}

fn decode_value(value: serde_json::Value) -> Result<Vec<FailureDomainResource>, SchemaError> {
    let api_version = value
        .get("apiVersion")
        .and_then(|v| v.as_str())
        .ok_or(SchemaError::MissingField("apiVersion"))?;
    if api_version != API_VERSION {
        return Err(SchemaError::UnsupportedApiVersion {
            expected: API_VERSION,
            actual: api_version.to_string(),
        });
    }

    let kind = value
        .get("kind")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or(SchemaError::MissingField("kind"))?;

    match kind.as_str() {
        KIND => Ok(vec![serde_json::from_value::<FailureDomainResource>(value)?]),
        LIST_KIND => Ok(serde_json::from_value::<FailureDomainList>(value)?.items),
        other => Err(SchemaError::UnexpectedKind(other.to_string())),
    }
}

/// Encodes a value as pretty-printed JSON.
pub fn encode_json<T: Serialize>(value: &T) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Encodes a value as a YAML document.
pub fn encode_yaml<T: Serialize>(value: &T) -> Result<String, SchemaError> {
    serde_yaml::to_string(value).map_err(SchemaError::YamlEncode)
}

/// Encodes a value in the given format.
pub fn encode<T: Serialize>(value: &T, format: Format) -> Result<String, SchemaError> {
    match format {
        Format::Json => encode_json(value),
        Format::Yaml => encode_yaml(value),
    }
}
