use gl::types::*;

use super::error::ShaderError;
use super::source::ShaderSource;
use super::stage::{Shader, ShaderStage};
use crate::render::backend::GlBackend;

/// A linked vertex + fragment program, deleted on drop.
pub struct Program<G: GlBackend> {
    gl: G,
    id: GLuint,
    validated: bool,
}

impl<G: GlBackend> Program<G> {
    pub fn from_source(gl: &G, source: &ShaderSource) -> Result<Self, ShaderError> {
        Self::new(gl, source.vertex_text(), source.fragment_text())
    }

    /// Compiles both stages, links them and validates the result.
    ///
    /// A stage that fails to compile aborts creation before any program
    /// object exists. A failed link is returned as [`ShaderError::Linking`].
    /// A failed validation is only logged, see [`Program::is_validated`].
    pub fn new(gl: &G, vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        let vertex_shader = Shader::compile(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment_shader = Shader::compile(gl, ShaderStage::Fragment, fragment_source)?;

        let id = gl.create_program();
        if id == 0 {
            return Err(ShaderError::ObjectCreation("program"));
        }
        let mut program = Program {
            gl: gl.clone(),
            id,
            validated: false,
        };

        gl.attach_shader(id, vertex_shader.id());
        gl.attach_shader(id, fragment_shader.id());
        gl.link_program(id);
        gl.validate_program(id);
        gl.detach_shader(id, vertex_shader.id());
        gl.detach_shader(id, fragment_shader.id());
        drop(vertex_shader);
        drop(fragment_shader);

        if !gl.program_link_status(id) {
            let error = ShaderError::Linking(gl.program_info_log(id));
            log::error!("{}", error);
            return Err(error);
        }

        program.validated = gl.program_validate_status(id);
        if !program.validated {
            log::warn!(
                "Program {} failed validation: {}",
                id,
                gl.program_info_log(id)
            );
        }

        log::debug!("Linked shader program {}", id);
        Ok(program)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Whether `glValidateProgram` succeeded against the state at link time.
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn bind(&self) {
        self.gl.use_program(self.id);
    }
}

impl<G: GlBackend> Drop for Program<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}
