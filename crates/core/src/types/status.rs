//! Status enums for directory entries.
//!
//! The stored value of a user's status is free text. [`UserStatus`] names the
//! three values the directory knows how to style and offer in the edit form;
//! anything else is kept as-is and shown with the default badge.

use thiserror::Error;

/// Error returned when a status label is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user status: {0}")]
pub struct UnknownStatus(pub String);

/// Known user status values.
///
/// Labels are stored in Portuguese, matching the data the directory was
/// seeded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserStatus {
    /// Active team member ("Ativo").
    Active,
    /// Inactive team member ("Inativo").
    Inactive,
    /// Newly added, not yet reviewed ("Pendente").
    #[default]
    Pending,
}

impl UserStatus {
    /// All known statuses, in the order they are offered in the edit form.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Pending];

    /// The stored label for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Inactive => "Inativo",
            Self::Pending => "Pendente",
        }
    }

    /// Look up a stored label, returning `None` for free-text values.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ativo" => Ok(Self::Active),
            "Inativo" => Ok(Self::Inactive),
            "Pendente" => Ok(Self::Pending),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}
