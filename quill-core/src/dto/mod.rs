//! Data Transfer Objects
//!
//! Request bodies, query strings and the response envelope shared by every
//! Quill endpoint.

pub mod generation;
pub mod publication;
pub mod response;
