//! Account data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::credentials::Credential;

/// Role name every non-empty account store must keep at least one holder of
pub const ADMIN_ROLE: &str = "admin";

/// Role assigned to every non-first registration
pub const STUDENT_ROLE: &str = "student";

/// A capability tag attached to an account
///
/// Comparison, ordering and hashing are case-insensitive; display keeps the
/// spelling the role was created with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role {
    name: String,
}

impl Role {
    /// Create a role with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Role { name: name.into() }
    }

    /// The name as originally spelled
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name comparison
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    fn normalized(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Role {}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(&other.normalized())
    }
}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique login name, compared case-sensitively
    username: String,
    /// Login secret, never serialized
    #[serde(skip)]
    credential: Credential,
    /// Contact address
    email: String,
    /// Roles held, at most one per case-insensitive name
    roles: BTreeSet<Role>,
    /// When the account was created
    created_at: DateTime<Utc>,
    /// When the account last changed
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create an account with no roles; the manager assigns the initial role
    pub(crate) fn new(
        username: impl Into<String>,
        credential: Credential,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            username: username.into(),
            credential,
            email: email.into(),
            roles: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The login name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The contact address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Roles held, in case-insensitive name order
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    /// Number of roles held
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Whether a role with this name is held (case-insensitive)
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.matches(name))
    }

    /// Whether the admin role is held
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// When the account was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the account last changed
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn credential(&self) -> &Credential {
        &self.credential
    }

    pub(crate) fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
        self.touch();
    }

    /// Add a role; false means an equivalent role was already held
    pub(crate) fn add_role(&mut self, role: Role) -> bool {
        let added = self.roles.insert(role);
        if added {
            self.touch();
        }
        added
    }

    /// Drop a role by name; false means no such role was held
    pub(crate) fn remove_role(&mut self, name: &str) -> bool {
        let before = self.roles.len();
        self.roles.retain(|role| !role.matches(name));
        let removed = self.roles.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<&str> = self.roles.iter().map(|role| role.name()).collect();
        write!(
            f,
            "User: {}, Email: {}, Roles: [{}]",
            self.username,
            self.email,
            roles.join(", ")
        )
    }
}
