pub mod command_spec;
pub mod context;
pub mod position;

// Re-export commonly used types
pub use command_spec::CommandSpec;
pub use context::{ActiveEditor, ExecutionContext};
pub use position::Position;
