//! Hashing System - SHA-256 for Generation Manifests
//!
//! Provides deterministic, reproducible hashes so a generated unit can
//! be traced back to the exact description that produced it.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    let sorted = sort_value(&v);
    to_string(&sorted)
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let sorted_map: serde_json::Map<String, Value> = sorted
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_value(v)))
                .collect();
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Compute manifest hash for a generated unit
pub fn compute_manifest_hash<T: Serialize>(manifest: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(manifest)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

/// Compute job hash for audit logging
/// job_hash = sha256(syntax_id + syntax_version + canonical_description + engine_version)
pub fn compute_job_hash(
    syntax_id: &str,
    syntax_version: &str,
    description: &impl Serialize,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let canonical_description = canonical_json(description)?;
    let combined = format!(
        "{}:{}:{}:{}",
        syntax_id, syntax_version, canonical_description, engine_version
    );
    Ok(sha256_hex(combined.as_bytes()))
}

// We need hex encoding
mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": 2, "m": 3});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"a":2,"m":3,"z":1}"#);
    }

    #[test]
    fn test_hash_deterministic() {
        let data = b"func UserValidate(obj *User) []error {";
        let h1 = sha256_hex(data);
        let h2 = sha256_hex(data);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_job_hash_stable() {
        let description = json!({
            "name": "User",
            "packageName": "main"
        });
        let h1 = compute_job_hash("go", "1.0.0", &description, "1.0.0").unwrap();
        let h2 = compute_job_hash("go", "1.0.0", &description, "1.0.0").unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_job_hash_tracks_description() {
        let a = json!({"name": "User", "packageName": "main"});
        let b = json!({"name": "Account", "packageName": "main"});
        let ha = compute_job_hash("go", "1.0.0", &a, "1.0.0").unwrap();
        let hb = compute_job_hash("go", "1.0.0", &b, "1.0.0").unwrap();
        assert_ne!(ha, hb);
    }
}
