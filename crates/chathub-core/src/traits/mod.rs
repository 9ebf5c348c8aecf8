//! Cross-crate trait definitions.

pub mod archive;

pub use archive::MessageArchive;
