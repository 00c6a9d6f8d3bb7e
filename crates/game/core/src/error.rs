//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`CatalogError`, `RosterError`, `ControllerError`)
//! live next to the code that raises them. This module provides the shared
//! severity classification so drivers can decide how to surface a failure.
//!
//! Note that most "bad input" in a battle is deliberately *not* an error:
//! unknown items are inert, empty rosters stalemate, stale polls are no-ops.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was valid but arrived in the wrong controller phase.
    ///
    /// Examples: stopping an idle battle, changing speed mid-battle
    Recoverable,

    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: duplicate catalog entry, oversized roster
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common interface for all battle-core error types.
pub trait BattleError: core::error::Error {
    /// Classifies the error for recovery decisions.
    fn severity(&self) -> ErrorSeverity;
}
