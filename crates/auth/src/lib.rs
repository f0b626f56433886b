//! `doceria-auth` — user records and credential verification.
//!
//! Deliberately small: the login scheme compares a submitted secret against a
//! stored salted hash and hands back an opaque session token. There is no
//! further protocol (no claims, no expiry, no refresh).

pub mod password;
pub mod user;

pub use password::{hash_password, verify_password};
pub use user::{Role, User, UserId};
