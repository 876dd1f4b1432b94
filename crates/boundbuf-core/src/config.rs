//! Buffer configuration that downstream crates can serialize/deserialize.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Where a buffer's storage is meant to come from.
///
/// This is an allocation hint only. Without a garbage-collected heap there is
/// nothing for `External` to avoid, so both variants allocate from the global
/// allocator and every buffer operation behaves the same either way. The
/// allocation ledger in `boundbuf-mem` reports the two separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backing {
    /// Ordinary process heap.
    #[default]
    Managed,
    /// Storage requested "outside the managed heap".
    External,
}

impl Backing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backing::Managed => "managed",
            Backing::External => "external",
        }
    }
}

impl fmt::Display for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "managed" | "heap" => Ok(Backing::Managed),
            "external" | "direct" => Ok(Backing::External),
            other => Err(Error::Config(format!("unknown backing '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Number of elements each buffer holds. Fixed for the buffer's lifetime.
    pub capacity: usize,

    /// Allocation hint, see [`Backing`].
    pub backing: Backing,

    /// Optional hard cap (bytes) for the allocation ledger.
    pub ledger_cap_bytes: Option<usize>,

    /// Optional per-call acceptance cap applied to sinks by the demo driver.
    pub transfer_chunk: Option<usize>,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            backing: Backing::Managed,
            ledger_cap_bytes: None,
            transfer_chunk: None,
        }
    }
}

impl BufferConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn backing(mut self, backing: Backing) -> Self {
        self.backing = backing;
        self
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `BOUNDBUF_CAPACITY`: elements per buffer
    /// - `BOUNDBUF_BACKING`: `managed` or `external`
    /// - `BOUNDBUF_LEDGER_CAP_BYTES`: hard cap for the allocation ledger
    /// - `BOUNDBUF_TRANSFER_CHUNK`: per-call sink acceptance cap
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BufferConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(s) = lookup("BOUNDBUF_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.capacity = v;
            }
        }

        if let Some(s) = lookup("BOUNDBUF_BACKING") {
            if let Ok(v) = s.parse::<Backing>() {
                cfg.backing = v;
            }
        }

        if let Some(s) = lookup("BOUNDBUF_LEDGER_CAP_BYTES") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.ledger_cap_bytes = Some(v);
            }
        }

        if let Some(s) = lookup("BOUNDBUF_TRANSFER_CHUNK") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.transfer_chunk = Some(v);
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::Config("capacity must be positive".into()));
        }
        if self.transfer_chunk == Some(0) {
            return Err(Error::Config("transfer_chunk must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn backing_parses_aliases() {
        assert_eq!("managed".parse::<Backing>().unwrap(), Backing::Managed);
        assert_eq!(" Direct ".parse::<Backing>().unwrap(), Backing::External);
        assert!("offheap".parse::<Backing>().is_err());
        assert_eq!(Backing::External.to_string(), "external");
    }

    #[test]
    fn lookup_overrides_defaults_and_skips_garbage() {
        let env: HashMap<&str, &str> = [
            ("BOUNDBUF_CAPACITY", "64"),
            ("BOUNDBUF_BACKING", "external"),
            ("BOUNDBUF_LEDGER_CAP_BYTES", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let cfg = BufferConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.capacity, 64);
        assert_eq!(cfg.backing, Backing::External);
        assert_eq!(cfg.ledger_cap_bytes, None);
        assert_eq!(cfg.transfer_chunk, None);
    }

    #[test]
    fn json_fills_missing_fields() {
        let cfg = BufferConfig::from_json(r#"{"capacity": 10, "backing": "external"}"#).unwrap();
        assert_eq!(cfg.capacity, 10);
        assert_eq!(cfg.backing, Backing::External);
        assert_eq!(cfg.ledger_cap_bytes, None);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(BufferConfig::with_capacity(0).validate().is_err());
        assert!(BufferConfig::from_json(r#"{"capacity": 0}"#).is_err());
    }
}
