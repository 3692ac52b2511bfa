//! Typed data model: slugs, per-kind item records, and the stored library.

pub mod item;
pub mod library;
pub mod slug;
