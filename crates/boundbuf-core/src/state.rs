//! Serializable snapshot of a buffer's cursors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Cursor values at one point in time. Always satisfies
/// `mark <= position <= limit <= capacity` when taken from a live buffer;
/// deserialization rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCursorState")]
pub struct CursorState {
    pub position: usize,
    pub limit: usize,
    pub capacity: usize,
    pub mark: Option<usize>,
}

/// Wire shape of [`CursorState`] before the ordering check.
#[derive(Deserialize)]
struct RawCursorState {
    position: usize,
    limit: usize,
    capacity: usize,
    mark: Option<usize>,
}

impl TryFrom<RawCursorState> for CursorState {
    type Error = Error;

    fn try_from(raw: RawCursorState) -> Result<Self> {
        CursorState {
            position: raw.position,
            limit: raw.limit,
            capacity: raw.capacity,
            mark: raw.mark,
        }
        .validate()
    }
}

impl CursorState {
    /// Zero when a hand-built state has `position` past `limit`.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.position)
    }

    /// Checks the ordering the buffer guarantees after every operation.
    pub fn is_consistent(&self) -> bool {
        let mark_ok = self.mark.map_or(true, |m| m <= self.position);
        mark_ok && self.position <= self.limit && self.limit <= self.capacity
    }

    pub fn validate(self) -> Result<Self> {
        if self.is_consistent() {
            Ok(self)
        } else {
            Err(Error::Invariant(format!("cursor ordering broken ({self})")))
        }
    }
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position: {}, limit: {}, capacity: {}, mark: ",
            self.position, self.limit, self.capacity
        )?;
        match self.mark {
            Some(m) => write!(f, "{m}"),
            None => f.write_str("unset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reports_unset_mark() {
        let s = CursorState {
            position: 5,
            limit: 10,
            capacity: 10,
            mark: None,
        };
        assert_eq!(s.to_string(), "position: 5, limit: 10, capacity: 10, mark: unset");
        assert_eq!(s.remaining(), 5);
    }

    #[test]
    fn consistency_check_catches_bad_mark() {
        let s = CursorState {
            position: 2,
            limit: 4,
            capacity: 8,
            mark: Some(3),
        };
        assert!(!s.is_consistent());
    }

    #[test]
    fn snapshot_serializes_as_flat_object() {
        let s = CursorState {
            position: 3,
            limit: 10,
            capacity: 10,
            mark: Some(3),
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"position":3,"limit":10,"capacity":10,"mark":3}"#);
        let back: CursorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn position_past_limit_has_nothing_remaining() {
        let s = CursorState {
            position: 5,
            limit: 2,
            capacity: 8,
            mark: None,
        };
        assert_eq!(s.remaining(), 0);
        assert!(matches!(s.validate(), Err(Error::Invariant(_))));
    }

    #[test]
    fn inconsistent_snapshot_is_rejected_on_load() {
        let err = serde_json::from_str::<CursorState>(
            r#"{"position":5,"limit":2,"capacity":8,"mark":null}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("cursor ordering broken"));

        let err = serde_json::from_str::<CursorState>(
            r#"{"position":1,"limit":4,"capacity":8,"mark":3}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("mark: 3"));
    }
}
