//! Client-side state core for the plugin-warden management console.
//!
//! `model` holds the records, `remote` talks to the server, and `console`
//! keeps the in-memory view consistent under polling and mutations.

pub mod console;
pub mod model;
pub mod remote;
