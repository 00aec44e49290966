//! PEM material loading for the gateway connection.
//!
//! The MSP layout keeps exactly one certificate and one key file per user
//! directory, with generated names; callers configure the directory and the
//! first regular file inside it is used.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Read the first regular file (by name order) of `dir`.
pub fn read_first_file(dir: impl AsRef<Path>) -> Result<Vec<u8>> {
    let dir = dir.as_ref();
    let mut names: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.path())
        .collect();
    names.sort();
    let Some(first) = names.first() else {
        bail!("no files in {}", dir.display());
    };
    fs::read(first).with_context(|| format!("failed to read {}", first.display()))
}

/// Client X.509 identity: signing certificate + private key, both PEM.
pub fn load_identity(cert_dir: &str, key_dir: &str) -> Result<reqwest::Identity> {
    let mut pem = read_first_file(cert_dir).context("failed to read certificate file")?;
    let key = read_first_file(key_dir).context("failed to read private key file")?;
    pem.extend_from_slice(b"\n");
    pem.extend_from_slice(&key);
    reqwest::Identity::from_pem(&pem).context("invalid client identity PEM")
}

/// Root CA certificate used to verify the gateway peer's TLS certificate.
pub fn load_root_ca(path: &str) -> Result<reqwest::Certificate> {
    let pem = fs::read(path).with_context(|| format!("failed to read TLS certificate {path}"))?;
    reqwest::Certificate::from_pem(&pem).context("invalid TLS CA PEM")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn read_first_file_picks_name_order() {
        let dir = std::env::temp_dir().join("annsync-identity-test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.pem"), b"second").unwrap();
        fs::write(dir.join("a.pem"), b"first").unwrap();

        let got = read_first_file(&dir).unwrap();
        assert_eq!(got, b"first");
    }

    #[test]
    fn read_first_file_fails_on_empty_dir() {
        let dir = std::env::temp_dir().join("annsync-identity-empty");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        assert!(read_first_file(&dir).is_err());
    }
}
