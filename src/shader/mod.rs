//! Loading, compiling and linking of `.shader` files.

pub mod error;
pub mod program;
pub mod source;
pub mod stage;

pub use error::ShaderError;
pub use program::Program;
pub use source::ShaderSource;
pub use stage::{Shader, ShaderStage};
