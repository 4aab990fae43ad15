//! CLI command implementations.

pub mod new;
pub mod serve;

pub use new::new_entry;
pub use serve::serve;
