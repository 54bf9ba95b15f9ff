//! Team directory user domain types.
//!
//! These are plain value records: the repository hands out copies and takes
//! [`UserFields`] back for writes, so no handler ever holds a live database
//! object.

use naturalle_core::{UserId, UserStatus};
use serde::Deserialize;

/// A user in the team directory (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Storage-assigned ID, immutable for the life of the record.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email. Not validated beyond being present.
    pub email: String,
    /// Free-text role label (e.g., "Admin", "Vendas").
    pub role: String,
    /// Status label. Usually one of [`UserStatus`], but any text is kept.
    pub status: String,
}

impl UserRecord {
    /// The editable fields of this record.
    #[must_use]
    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            status: self.status.clone(),
        }
    }

    /// The known status, if the stored label is one.
    #[must_use]
    pub fn known_status(&self) -> Option<UserStatus> {
        UserStatus::from_label(&self.status)
    }
}

/// The four editable fields of a user, replaced together on every write.
///
/// Doubles as the form body of `POST /update/{id}`: every field must be
/// present, but blank values are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl UserFields {
    /// Build fields from borrowed values.
    #[must_use]
    pub fn new(name: &str, email: &str, role: &str, status: UserStatus) -> Self {
        Self {
            name: name.to_owned(),
            email: email.to_owned(),
            role: role.to_owned(),
            status: status.as_str().to_owned(),
        }
    }

    /// Placeholder values used by the "quick add" button.
    #[must_use]
    pub fn quick_add() -> Self {
        Self::new(
            "Novo Usuário",
            "novo@exemplo.com",
            "Convidado",
            UserStatus::Pending,
        )
    }

    /// The sample records inserted into an empty directory.
    #[must_use]
    pub fn samples() -> [Self; 3] {
        [
            Self::new(
                "João Victor",
                "joao@naturalle.com",
                "Admin",
                UserStatus::Active,
            ),
            Self::new(
                "Maria Silva",
                "maria@vendas.com",
                "Vendas",
                UserStatus::Inactive,
            ),
            Self::new("Carlos Dev", "carlos@tech.com", "Dev", UserStatus::Active),
        ]
    }
}
