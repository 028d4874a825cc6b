//! Shared fixtures for integration tests.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A full document with non-default values for every component.
#[allow(dead_code)]
pub const SERVICE_JSON: &str = r#"
{
  "api": {
    "ipfsproxy": {
      "proxy_listen_multiaddress": "/ip4/0.0.0.0/tcp/9095",
      "node_multiaddress": "/ip4/10.0.0.5/tcp/5001",
      "proxy_read_timeout": "10m",
      "proxy_read_header_timeout": "3s",
      "proxy_write_timeout": "0s",
      "proxy_idle_timeout": "1m30s"
    }
  },
  "informer": {
    "numpin": {
      "metric_ttl": "15s"
    }
  }
}
"#;

/// Write `contents` to `service.json` in a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
#[allow(dead_code)]
pub fn write_document(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("service.json");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

/// Replace one field of a JSON object and return the encoded bytes.
#[allow(dead_code)]
pub fn with_field(doc: &str, field: &str, value: &str) -> Vec<u8> {
    let mut value_doc: serde_json::Value = serde_json::from_str(doc).unwrap();
    value_doc[field] = serde_json::Value::String(value.to_string());
    serde_json::to_vec(&value_doc).unwrap()
}

#[allow(dead_code)]
pub fn read_document(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}
