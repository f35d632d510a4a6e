//! Core types for the Totem contact de-duplication engine.
//!
//! This crate holds the contact record and the closed sets of email and phone
//! kinds it is keyed by. It is deliberately free of matching and merging
//! logic; `totem-dedup` depends on it, not the other way round.

pub mod contact;
pub mod error;

pub use contact::{Contact, EmailKind, Label, PhoneKind};
pub use error::{Error, Result};
