//! Domain logic for the SCADA monitoring service.
//!
//! Pure logic only: no HTTP, no locking. The API crate owns the shared
//! instances and wraps them in the synchronisation it needs.

pub mod error;
pub mod machine;
pub mod types;
