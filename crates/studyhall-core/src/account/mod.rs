//! Account module
//!
//! Handles registration, login, roles and account administration.

pub mod credentials;
pub mod manager;
pub mod model;
pub mod policy;

pub use credentials::{Credential, CredentialVerifier, PlaintextVerifier};
pub use manager::{AccountManager, RoleUpdate, DELETE_CONFIRMATION};
pub use model::{Role, User, ADMIN_ROLE, STUDENT_ROLE};
pub use policy::{RegistrationPolicy, MIN_PASSWORD_LENGTH};
