pub mod config;
pub mod render;
pub mod shader;
pub mod window;

#[cfg(test)]
mod test_log;

// Re-export commonly used types
pub use config::QuarkConfig;
pub use render::{DemoKind, Gl, GlBackend, Mesh};
pub use shader::{Program, Shader, ShaderError, ShaderSource, ShaderStage};
pub use window::GlWindow;
