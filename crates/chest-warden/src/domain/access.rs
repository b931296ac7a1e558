//! Tagged access decisions.

/// Outcome of an access check or a proposed sign edit.
///
/// `Deny` carries the human-facing reason; shims forward it through the
/// host's chat channel. Denies are part of normal operation and are never
/// logged as errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny { reason: String },
}

impl Access {
    pub fn deny(reason: impl Into<String>) -> Self {
        Access::Deny {
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Access::Allow => None,
            Access::Deny { reason } => Some(reason),
        }
    }
}
