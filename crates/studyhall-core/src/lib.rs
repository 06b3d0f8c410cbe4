//! studyhall-core - Core library for studyhall
//!
//! This crate provides the domain logic for the studyhall community tool,
//! including account management with role rules, the question and answer
//! lifecycle, and the course review feed.

pub mod error;
pub mod types;
pub mod config;
pub mod validate;
pub mod account;
pub mod question;
pub mod review;

pub use error::{AuthFailure, ErrorKind, Result, StudyhallError};
pub use types::*;
