pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod reporting;
pub mod scanner;
pub mod target;
pub mod verdict;

// Re-export commonly used items
pub use config::*;
pub use engine::*;
pub use error::*;
pub use models::*;
pub use reporting::*;
pub use scanner::*;
pub use target::*;
pub use verdict::*;
