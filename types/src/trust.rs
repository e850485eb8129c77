use std::fmt;

/// Outcome of a certificate-chain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustDecision {
    Accept,
    Reject { reason: Option<String> },
}

impl TrustDecision {
    #[must_use]
    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject {
            reason: Some(reason.into()),
        }
    }

    #[must_use]
    pub const fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accept => None,
            Self::Reject { reason } => reason.as_deref(),
        }
    }
}

impl fmt::Display for TrustDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("accept"),
            Self::Reject { reason: Some(reason) } => write!(f, "reject: {reason}"),
            Self::Reject { reason: None } => f.write_str("reject"),
        }
    }
}
