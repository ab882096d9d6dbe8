//! Core domain types
//!
//! This module contains the entities exposed by the Quill API. These types
//! are deserialized by the client and rendered by the CLI.

pub mod account;
pub mod file;
pub mod generation;
pub mod publication;
