//! Configuration fingerprint and layout script resolution
//!
//! A configuration is identified by the names of its connected displays
//! together with a short hash of each display's EDID, so plugging a
//! different monitor into the same port selects a different script.

use std::collections::HashMap;
use std::fmt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use crate::constants::identity::{HASH_LENGTH, SCRIPT_EXTENSION, SEPARATOR};
use crate::error::AutolayoutError;
use crate::types::DisplayRecord;

/// Short, filename-safe hash of a display's raw identity bytes
pub fn hardware_hash(edid: &[u8]) -> String {
    let digest = Sha256::digest(edid);
    let mut encoded = URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(HASH_LENGTH);
    encoded
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityToken {
    pub name: String,
    pub hash: String,
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.name, self.hash)
    }
}

/// Identity of the currently connected set of displays, sorted by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(Vec<IdentityToken>);

impl Fingerprint {
    pub fn new(mut tokens: Vec<IdentityToken>) -> Self {
        tokens.sort_by(|a, b| a.name.cmp(&b.name));
        Self(tokens)
    }

    /// Pair each record with its EDID. A connector without EDID hashes the
    /// empty byte string.
    pub fn from_displays(records: &[DisplayRecord], edids: &HashMap<String, Vec<u8>>) -> Self {
        Self::new(
            records
                .iter()
                .map(|record| IdentityToken {
                    name: record.name.clone(),
                    hash: hardware_hash(edids.get(&record.name).map_or(&[][..], Vec::as_slice)),
                })
                .collect(),
        )
    }

    pub fn tokens(&self) -> &[IdentityToken] {
        &self.0
    }

    /// `<name1>_<hash1>_<name2>_<hash2>.sh`
    pub fn script_name(&self) -> String {
        let stem = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        format!("{stem}.{SCRIPT_EXTENSION}")
    }

    pub fn script_path(&self, script_dir: &Path) -> PathBuf {
        script_dir.join(self.script_name())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.tokens().iter().map(|t| t.name.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Locate the executable layout script for `fingerprint`
pub fn resolve_script(script_dir: &Path, fingerprint: &Fingerprint) -> Result<PathBuf, AutolayoutError> {
    let path = fingerprint.script_path(script_dir);
    let metadata = match std::fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return Err(AutolayoutError::ScriptNotFound(path)),
    };
    if metadata.permissions().mode() & 0o111 == 0 {
        return Err(AutolayoutError::ScriptNotExecutable(path));
    }
    Ok(path)
}
