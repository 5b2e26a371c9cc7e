//! Credential handling for the user store.

pub mod password;
