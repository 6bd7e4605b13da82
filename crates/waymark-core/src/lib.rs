pub mod paths;
pub mod stamp;
pub mod types;

pub use paths::ContextPaths;
pub use stamp::Timestamp;
pub use types::*;
