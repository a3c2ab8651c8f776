// Pokemon Catalog Schema - Shared type definitions
// This crate contains the catalog records and filter vocabulary that are shared
// between the catalog engine, its front ends and their tests.

// Re-export the main types
pub use category::*;
pub use entry::*;
pub use selection::*;

pub mod category;
pub mod entry;
pub mod selection;
