//! Typed identifiers and ID generation.
//!
//! # Responsibility
//! - Give columns, cards and checklist items distinct ID types so one kind
//!   can never be passed where another is expected.
//! - Provide pluggable fresh-ID generation.
//!
//! # Invariants
//! - IDs are opaque strings; only equality and ordering are meaningful.
//! - Generated IDs are never reused within one generator lifetime.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a board column.
    ColumnId
);
opaque_id!(
    /// Identifier of a card, unique within one board.
    CardId
);
opaque_id!(
    /// Identifier of a checklist item, unique within its card.
    ChecklistItemId
);

/// Source of fresh opaque identifier strings.
///
/// All entity kinds draw from one generator; the typed wrappers are applied
/// by the callers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;

    fn column_id(&mut self) -> ColumnId {
        ColumnId(self.next_id())
    }

    fn card_id(&mut self) -> CardId {
        CardId(self.next_id())
    }

    fn checklist_item_id(&mut self) -> ChecklistItemId {
        ChecklistItemId(self.next_id())
    }
}

/// Random UUID v4 generator used by the running application.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic `prefix-N` generator for reproducible boards.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::{CardId, IdGenerator, SequentialIdGenerator, UuidIdGenerator};
    use std::collections::HashSet;

    #[test]
    fn sequential_generator_is_deterministic() {
        let mut ids = SequentialIdGenerator::new("t");
        assert_eq!(ids.next_id(), "t-1");
        assert_eq!(ids.card_id(), CardId::new("t-2"));
        assert_eq!(ids.column_id().as_str(), "t-3");
    }

    #[test]
    fn uuid_generator_does_not_repeat() {
        let mut ids = UuidIdGenerator;
        let seen: HashSet<String> = (0..64).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 64);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&CardId::new("c1")).unwrap();
        assert_eq!(json, "\"c1\"");
    }
}
