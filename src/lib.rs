//! Mensajero Library
//!
//! Core library for the Mensajero chat client: a local-only conversation
//! store with write-through persistence, plus the session, preferences and
//! list projections a front end needs.

pub mod chat;
pub mod i18n;
pub mod session;
pub mod storage;
pub mod types;
