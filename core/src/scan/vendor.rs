use crate::prelude::{ScopeError, ScopeResult};
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Fallback name for prefixes the table does not resolve.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// In-memory OUI prefix table backing the detail panel's VENDOR row.
/// Loaded once; queries are pure and never fail.
#[derive(Debug, Clone, Default)]
pub struct VendorDb {
    entries: HashMap<String, String>,
}

impl VendorDb {
    /// Table with no entries; every lookup degrades to `Unknown`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses `PREFIX|Name` lines. Blank or malformed lines are skipped.
    pub fn from_reader<R: Read>(reader: R) -> ScopeResult<Self> {
        let mut entries = HashMap::new();
        for line in BufReader::new(reader).lines() {
            let line = line.map_err(|err| ScopeError::VendorDb(err.to_string()))?;
            if let Some((prefix, name)) = line.split_once('|') {
                let prefix = prefix.trim().to_ascii_uppercase();
                let name = name.trim();
                if !prefix.is_empty() && !name.is_empty() {
                    entries.insert(prefix, name.to_string());
                }
            }
        }
        debug!("vendor table loaded: {} prefixes", entries.len());
        Ok(Self { entries })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ScopeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| ScopeError::VendorDb(format!("{}: {}", path.display(), err)))?;
        Self::from_reader(file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the first six hex digits of a BSSID; separators and case
    /// are ignored. Unresolvable prefixes are not an error.
    pub fn lookup(&self, bssid: &str) -> &str {
        let clean: String = bssid
            .chars()
            .filter(|c| c.is_ascii_hexdigit())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if clean.len() < 6 {
            return UNKNOWN_VENDOR;
        }
        self.entries
            .get(&clean[..6])
            .map(String::as_str)
            .unwrap_or(UNKNOWN_VENDOR)
    }
}
