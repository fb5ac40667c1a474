//! A demo service built on warden: clients log in with an authorization level
//! and unlock routes guarded by increasingly higher requirements.
pub mod configuration;
pub mod routes;
