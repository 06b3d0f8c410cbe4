//! Account manager for registration, login and role administration

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::credentials::{Credential, CredentialVerifier, PlaintextVerifier};
use super::model::{Role, User, ADMIN_ROLE, STUDENT_ROLE};
use super::policy::RegistrationPolicy;
use crate::error::{AuthFailure, Result, StudyhallError};
use crate::validate::is_valid_email;

/// Confirmation token required for account deletion, compared case-insensitively
pub const DELETE_CONFIRMATION: &str = "Yes";

/// Whether `update_role` grants or revokes the named role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleUpdate {
    Grant,
    Revoke,
}

/// Manager for registered accounts
///
/// Guards the store-wide rule that a non-empty store always holds at least
/// one admin: the last admin account cannot be deleted and the last admin
/// role cannot be revoked.
pub struct AccountManager {
    /// All users by username
    users: HashMap<String, User>,
    /// Credential check strategy
    verifier: Arc<dyn CredentialVerifier>,
    /// Rules for new passwords
    policy: RegistrationPolicy,
}

impl AccountManager {
    /// Create a manager with default settings
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            verifier: Arc::new(PlaintextVerifier),
            policy: RegistrationPolicy::new(),
        }
    }

    /// Create a manager with a custom credential verifier
    pub fn with_verifier(verifier: impl CredentialVerifier + 'static) -> Self {
        Self {
            users: HashMap::new(),
            verifier: Arc::new(verifier),
            policy: RegistrationPolicy::new(),
        }
    }

    /// Create a manager with a custom registration policy
    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        Self {
            users: HashMap::new(),
            verifier: Arc::new(PlaintextVerifier),
            policy,
        }
    }

    /// Register a new account
    ///
    /// Checks run in order: username present, username free, password policy,
    /// email shape. `first_user` selects the initial role: the bootstrap
    /// registration gets "admin", every later one gets "student". A non-first
    /// registration into an empty store is rejected, since it could never
    /// produce an admin.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        email: &str,
        first_user: bool,
    ) -> Result<()> {
        if username.trim().is_empty() {
            return Err(StudyhallError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }
        if self.users.contains_key(username) {
            return Err(StudyhallError::UsernameTaken(username.to_string()));
        }
        self.policy.check_password(password)?;
        if !is_valid_email(email) {
            return Err(StudyhallError::Validation(
                "Invalid email format".to_string(),
            ));
        }
        if !first_user && self.users.is_empty() {
            warn!("Rejected registration of '{}' into an empty store", username);
            return Err(StudyhallError::FirstUserMustBeAdmin);
        }

        let role = if first_user { ADMIN_ROLE } else { STUDENT_ROLE };
        let mut user = User::new(username, Credential::new(password), email);
        user.add_role(Role::new(role));
        self.users.insert(username.to_string(), user);

        debug!("Registered user '{}' with role '{}'", username, role);
        Ok(())
    }

    /// Log in; on success hands back the account
    pub fn login(&self, username: &str, password: &str) -> Result<&User> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(StudyhallError::Auth(AuthFailure::MissingCredentials));
        }
        let user = self
            .users
            .get(username)
            .ok_or(StudyhallError::Auth(AuthFailure::UnknownUser))?;
        if !self.verifier.verify(user.credential(), password) {
            warn!("Failed login for '{}'", username);
            return Err(StudyhallError::Auth(AuthFailure::WrongPassword));
        }
        Ok(user)
    }

    /// Delete an account, returning it
    ///
    /// The last-admin rule is checked before the confirmation token: the only
    /// admin cannot be deleted no matter what was confirmed. Every other
    /// deletion needs the literal token "Yes" in any casing.
    pub fn delete(&mut self, username: &str, confirmation: &str) -> Result<User> {
        let user = self
            .users
            .get(username)
            .ok_or_else(|| StudyhallError::UserNotFound(username.to_string()))?;
        if user.is_admin() && self.admin_count() <= 1 {
            warn!("Refused to delete '{}': only admin left", username);
            return Err(StudyhallError::LastAdminAccount);
        }
        if !confirmation.eq_ignore_ascii_case(DELETE_CONFIRMATION) {
            return Err(StudyhallError::ConfirmationRequired);
        }

        let removed = self
            .users
            .remove(username)
            .ok_or_else(|| StudyhallError::UserNotFound(username.to_string()))?;
        debug!("Deleted user '{}'", username);
        Ok(removed)
    }

    /// Grant or revoke a role on an account
    ///
    /// Revoking a role named "admin" in any casing is refused while the store
    /// has at most one admin, even when the target does not hold it; the
    /// operation is suspect either way.
    pub fn update_role(
        &mut self,
        username: &str,
        role_name: &str,
        update: RoleUpdate,
    ) -> Result<()> {
        if !self.users.contains_key(username) {
            return Err(StudyhallError::UserNotFound(username.to_string()));
        }

        match update {
            RoleUpdate::Grant => {
                let user = self
                    .users
                    .get_mut(username)
                    .ok_or_else(|| StudyhallError::UserNotFound(username.to_string()))?;
                if user.add_role(Role::new(role_name)) {
                    debug!("Granted role '{}' to '{}'", role_name, username);
                }
                Ok(())
            }
            RoleUpdate::Revoke => {
                if role_name.to_lowercase() == ADMIN_ROLE && self.admin_count() <= 1 {
                    warn!(
                        "Refused to revoke '{}' from '{}': only admin left",
                        role_name, username
                    );
                    return Err(StudyhallError::LastAdminRole);
                }
                let user = self
                    .users
                    .get_mut(username)
                    .ok_or_else(|| StudyhallError::UserNotFound(username.to_string()))?;
                if user.remove_role(role_name) {
                    debug!("Revoked role '{}' from '{}'", role_name, username);
                }
                Ok(())
            }
        }
    }

    /// Replace an account's password, applying the registration policy
    pub fn change_password(&mut self, username: &str, new_password: &str) -> Result<()> {
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| StudyhallError::UserNotFound(username.to_string()))?;
        self.policy.check_password(new_password)?;
        user.set_credential(Credential::new(new_password));
        debug!("Changed password for '{}'", username);
        Ok(())
    }

    /// Look up an account by exact username
    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Number of accounts holding the admin role
    pub fn admin_count(&self) -> usize {
        self.users.values().filter(|user| user.is_admin()).count()
    }

    /// All accounts in undefined order
    pub fn all(&self) -> Vec<&User> {
        self.users.values().collect()
    }

    /// All accounts sorted by username
    pub fn all_sorted(&self) -> Vec<&User> {
        let mut users: Vec<_> = self.users.values().collect();
        users.sort_by(|a, b| a.username().cmp(b.username()));
        users
    }

    /// Number of accounts
    pub fn count(&self) -> usize {
        self.users.len()
    }

    /// Whether nobody is registered yet
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for AccountManager {
    fn default() -> Self {
        Self::new()
    }
}
