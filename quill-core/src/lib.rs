//! Quill Core
//!
//! Shared types for the Quill content generation API.
//!
//! This crate contains:
//! - Domain types: Entities returned by the API (Publication, generation jobs, files, etc.)
//! - DTOs: Request bodies, query parameters and the JSON response envelope

pub mod domain;
pub mod dto;
