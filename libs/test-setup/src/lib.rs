#![deny(unsafe_code, rust_2018_idioms)]

//! This crate contains fixtures and utilities that are useful for writing tests across the
//! workspace.

mod logging;

pub use logging::init_logging;

/// A DMMF document for a small blog: `User`, `Post` and `Comment` models, a
/// `Role` enum, the filter and create inputs, aggregate, group-by and batch
/// output types.
pub const BLOG_DMMF: &str = include_str!("../fixtures/blog.dmmf.json");
