//! User domain model.

use super::error::{FolioError, Result};
use super::record::{FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role as stored by the API.
///
/// The wire spelling of the blocked role is capitalised (`"Blocked"`), unlike
/// the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "Blocked", alias = "blocked")]
    Blocked,
}

impl Role {
    /// The role an admin toggle moves this account to.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Forbidden`] for admins, whose role cannot be
    /// changed through this client.
    pub fn toggled(self) -> Result<Self> {
        match self {
            Self::User => Ok(Self::Blocked),
            Self::Blocked => Ok(Self::User),
            Self::Admin => Err(FolioError::Forbidden(
                "admin accounts cannot be blocked".to_string(),
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for User {
    const SORT_FIELDS: &'static [&'static str] = &["name", "email", "role", "createdAt"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, self.role.as_str()]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "email" => Some(FieldValue::Text(&self.email)),
            "role" => Some(FieldValue::Text(self.role.as_str())),
            #[allow(clippy::cast_precision_loss)]
            "createdAt" => self
                .created_at
                .map(|t| FieldValue::Number(t.timestamp_millis() as f64)),
            _ => None,
        }
    }

    fn revision(&self) -> Option<i64> {
        self.updated_at.map(|t| t.timestamp_millis())
    }
}

/// Sign-up payload for `POST /api/users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// # Errors
    ///
    /// Returns [`FolioError::Validation`] for a blank name, an email without
    /// `@`, or a password shorter than six characters.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FolioError::Validation("name is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(FolioError::Validation("email is invalid".to_string()));
        }
        if self.password.chars().count() < 6 {
            return Err(FolioError::Validation(
                "password must be at least 6 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Credentials for the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
