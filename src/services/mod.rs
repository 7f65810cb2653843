//! Service implementations.

pub mod content;

pub use content::{ContentService, ContentServiceImpl, ContentStream};
