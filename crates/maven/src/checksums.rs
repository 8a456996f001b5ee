use crate::coords::{Coords, Ext};
use crate::error::{MavenError, Result};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Memoized SHA-1 lookup for remote artifacts. One store lives for the
/// duration of a run; the lockfile seeds it to avoid network calls.
pub struct ChecksumStore {
    sha1: HashMap<String, String>,
    http: reqwest::blocking::Client,
}

impl Default for ChecksumStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumStore {
    pub fn new() -> Self {
        ChecksumStore {
            sha1: HashMap::new(),
            http: reqwest::blocking::Client::builder()
                .connect_timeout(Duration::from_secs(3))
                .build()
                .expect("default TLS backend"),
        }
    }

    pub fn set(&mut self, coords: &Coords, ext: Ext, sha1: impl Into<String>) {
        self.sha1.insert(coords.remote_with(ext), sha1.into());
    }

    /// Cached checksum, fetching and memoizing on a miss.
    pub fn get(&mut self, coords: &Coords, ext: Ext) -> Result<String> {
        let uri = coords.remote_with(ext);
        if let Some(known) = self.sha1.get(&uri) {
            return Ok(known.clone());
        }
        let sum = self.fetch_uri(&uri)?;
        self.sha1.insert(uri, sum.clone());
        Ok(sum)
    }

    /// Uncached fetch; `None` instead of an error when `nofail` is set.
    pub fn fetch(&self, coords: &Coords, ext: Ext, nofail: bool) -> Result<Option<String>> {
        let uri = coords.remote_with(ext);
        match self.fetch_uri(&uri) {
            Ok(sum) => Ok(Some(sum)),
            Err(e) if nofail => {
                warn!("{e}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn fetch_uri(&self, uri: &str) -> Result<String> {
        debug!(%uri, "fetch checksum");
        let body = self
            .http
            .get(uri)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|source| MavenError::Checksum {
                uri: uri.to_string(),
                source,
            })?;
        Ok(extract_sha1(&body))
    }
}

/// Checksum files occasionally carry a trailing file name; only the
/// first token matters.
fn extract_sha1(body: &str) -> String {
    body.split_whitespace().next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_checksum_needs_no_network() {
        let coords = Coords::parse("com.acme:util:1.0").unwrap();
        let mut store = ChecksumStore::new();
        store.set(&coords, Ext::JarSum, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(
            store.get(&coords, Ext::JarSum).unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn jar_and_src_checksums_are_distinct_entries() {
        let coords = Coords::parse("com.acme:util:1.0").unwrap();
        let mut store = ChecksumStore::new();
        store.set(&coords, Ext::JarSum, "aaa");
        store.set(&coords, Ext::SrcSum, "bbb");
        assert_eq!(store.get(&coords, Ext::JarSum).unwrap(), "aaa");
        assert_eq!(store.get(&coords, Ext::SrcSum).unwrap(), "bbb");
    }

    #[test]
    fn sha1_extraction_takes_first_token() {
        assert_eq!(extract_sha1("abc123  util-1.0.jar\n"), "abc123");
        assert_eq!(extract_sha1("abc123"), "abc123");
        assert_eq!(extract_sha1(""), "");
    }
}
