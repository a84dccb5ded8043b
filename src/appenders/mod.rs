//! Appender implementations

pub mod console;
pub mod file;
pub mod memory;
pub mod multi;
pub mod writer;

pub use console::{ConsoleAppender, ConsoleTarget};
pub use file::FileAppender;
pub use memory::MemoryAppender;
pub use multi::MultiAppender;
pub use writer::WriterAppender;

// Re-export the trait for convenience
pub use crate::core::Appender;
