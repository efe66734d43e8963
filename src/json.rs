//! JSON convenience helpers on top of serde_json.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, StrandError};

/// Serialize to a string, returning an empty string on failure.
///
/// Logging-oriented: lets call sites embed a value without threading an
/// error path through.
pub fn to_string_lossy<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Re-serialize one type into another through a JSON value.
pub fn convert<S, D>(source: &S) -> Result<D>
where
    S: Serialize,
    D: DeserializeOwned,
{
    let value = serde_json::to_value(source)?;
    Ok(serde_json::from_value(value)?)
}

/// Read and decode a JSON file.
pub fn read_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let data = fs::read(path)
        .map_err(|source| StrandError::io(format!("read {}", path.display()), source))?;
    Ok(serde_json::from_slice(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    #[test]
    fn test_to_string_lossy() {
        let rendered = to_string_lossy(&json!({"a": 1}));
        assert_eq!(rendered, r#"{"a":1}"#);
    }

    #[test]
    fn test_convert_between_types() {
        let value = json!({"host": "10.0.0.1", "port": 8080});
        let endpoint: Endpoint = convert(&value).unwrap();
        assert_eq!(
            endpoint,
            Endpoint {
                host: "10.0.0.1".to_string(),
                port: 8080
            }
        );
    }

    #[test]
    fn test_convert_shape_mismatch() {
        let value = json!({"host": "10.0.0.1"});
        let result: Result<Endpoint> = convert(&value);
        assert!(matches!(result, Err(StrandError::Serialization { .. })));
    }

    #[test]
    fn test_read_file_missing() {
        let result: Result<Endpoint> = read_file("/definitely/not/here.json");
        assert!(matches!(result, Err(StrandError::Io { .. })));
    }
}
