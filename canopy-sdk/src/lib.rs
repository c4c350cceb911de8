//! Shared types and HTTP clients for the Canopy platform.
//!
//! `objects` holds the wire types exchanged with the backend; `client`
//! holds the typed HTTP clients built on top of them.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;
