use serde::{Deserialize, Serialize};
use std::fmt;

use super::mesh::Vertex;

/// Which of the hello-triangle exercises to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    /// One triangle through `glDrawArrays`.
    Triangle,
    /// Two triangles forming a quad through `glDrawElements`.
    #[default]
    Quad,
}

pub struct Geometry {
    pub vertices: &'static [Vertex],
    pub indices: Option<&'static [u32]>,
}

const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5),
    Vertex::new(0.0, 0.5),
    Vertex::new(0.5, -0.5),
];

const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new(0.5, 0.5),   // top-right
    Vertex::new(0.5, -0.5),  // bottom-right
    Vertex::new(-0.5, -0.5), // bottom-left
    Vertex::new(-0.5, 0.5),  // top-left
];

#[rustfmt::skip]
const QUAD_INDICES: [u32; 6] = [
    0, 1, 2, // bottom-right triangle
    2, 3, 0, // top-left triangle
];

impl DemoKind {
    pub fn geometry(self) -> Geometry {
        match self {
            DemoKind::Triangle => Geometry {
                vertices: &TRIANGLE_VERTICES,
                indices: None,
            },
            DemoKind::Quad => Geometry {
                vertices: &QUAD_VERTICES,
                indices: Some(&QUAD_INDICES),
            },
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoKind::Triangle => f.write_str("triangle"),
            DemoKind::Quad => f.write_str("quad"),
        }
    }
}
