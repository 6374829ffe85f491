pub mod backend;
pub mod demo;
pub mod mesh;

pub use backend::{Gl, GlBackend};
pub use demo::DemoKind;
pub use mesh::{Mesh, Vertex};
