use gl::types::*;
use std::ffi::CString;
use std::fmt;

use super::error::ShaderError;
use crate::render::backend::GlBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

    pub fn gl_kind(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled shader object, deleted on drop.
pub struct Shader<G: GlBackend> {
    gl: G,
    id: GLuint,
    stage: ShaderStage,
}

impl<G: GlBackend> Shader<G> {
    /// Compiles `source` as a single-string shader of the given stage.
    ///
    /// On a failed compile the driver's info log is logged and returned in
    /// [`ShaderError::Compilation`]; the shader object is released before
    /// returning.
    pub fn compile(gl: &G, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let source = CString::new(source.as_bytes())?;

        let id = gl.create_shader(stage.gl_kind());
        if id == 0 {
            return Err(ShaderError::ObjectCreation("shader"));
        }
        let shader = Shader {
            gl: gl.clone(),
            id,
            stage,
        };

        gl.shader_source(id, &source);
        gl.compile_shader(id);

        if !gl.shader_compile_status(id) {
            let mut log = gl.shader_info_log(id);
            if log.is_empty() {
                log = String::from("(driver reported no info log)");
            }

            let error = ShaderError::Compilation { stage, log };
            log::error!("{}", error);
            return Err(error);
        }

        Ok(shader)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<G: GlBackend> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::fake::{Call, FakeGl, COMPILE_LOG};
    use crate::test_log;
    use log::Level;

    #[test]
    fn test_stage_names_and_kinds() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
        assert_eq!(ShaderStage::Vertex.gl_kind(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_kind(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn test_compile_success() {
        let gl = FakeGl::new();
        let (result, records) =
            test_log::capture(|| Shader::compile(&gl, ShaderStage::Vertex, "void main() {}\n"));
        let shader = result.unwrap();
        assert!(records.iter().all(|(level, _)| *level != Level::Error));

        assert_eq!(shader.stage(), ShaderStage::Vertex);
        assert_eq!(gl.source_of(shader.id()).as_deref(), Some("void main() {}\n"));
        assert_eq!(
            gl.calls(),
            vec![
                Call::CreateShader(gl::VERTEX_SHADER, shader.id()),
                Call::ShaderSource(shader.id()),
                Call::CompileShader(shader.id()),
            ]
        );
        assert_eq!(gl.live_shaders(), 1);

        drop(shader);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn test_compile_failure_reports_stage_and_log() {
        let gl = FakeGl::new();

        for stage in ShaderStage::ALL {
            let (result, records) =
                test_log::capture(|| Shader::compile(&gl, stage, "void mian( {"));
            let error = match result {
                Err(error) => error,
                Ok(_) => panic!("{stage} shader should not compile"),
            };

            let errors: Vec<_> = records
                .iter()
                .filter(|(level, _)| *level == Level::Error)
                .map(|(_, message)| message)
                .collect();
            assert_eq!(errors.len(), 1, "{records:?}");
            assert!(errors[0].contains(stage.name()));
            assert!(errors[0].contains(COMPILE_LOG));

            match &error {
                ShaderError::Compilation { stage: failed, log } => {
                    assert_eq!(*failed, stage);
                    assert_eq!(log, COMPILE_LOG);
                }
                other => panic!("unexpected error: {other:?}"),
            }

            let message = error.to_string();
            assert!(message.contains(stage.name()));
            assert!(message.contains(COMPILE_LOG));
        }

        assert_eq!(gl.live_shaders(), 0);
        assert!(matches!(gl.calls().last(), Some(Call::DeleteShader(_))));
    }

    #[test]
    fn test_compile_rejects_interior_nul() {
        let gl = FakeGl::new();
        let result = Shader::compile(&gl, ShaderStage::Fragment, "void main() {}\0");

        assert!(matches!(result, Err(ShaderError::Nul(_))));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn test_compile_reports_object_creation_failure() {
        let gl = FakeGl::new().failing_object_creation();
        let result = Shader::compile(&gl, ShaderStage::Vertex, "void main() {}");

        assert!(matches!(result, Err(ShaderError::ObjectCreation("shader"))));
    }
}
