use gl::types::*;
use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::ptr;

/// Shader and program entry points of the GL API.
///
/// Implementations assume a context is current on the calling thread.
pub trait GlBackend: Clone {
    fn create_shader(&self, kind: GLenum) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &CStr);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn program_link_status(&self, program: GLuint) -> bool;
    fn validate_program(&self, program: GLuint);
    fn program_validate_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn use_program(&self, program: GLuint);
    fn delete_program(&self, program: GLuint);
}

/// Backend over the global function pointers of the `gl` crate.
///
/// Only obtainable through [`Gl::load_with`], so holding one means the
/// pointers have been loaded for the current context.
#[derive(Debug, Clone, Copy)]
pub struct Gl {
    _loaded: (),
}

impl Gl {
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        if !gl::CreateShader::is_loaded() || !gl::GenVertexArrays::is_loaded() {
            log::error!("Failed to load OpenGL function pointers, shader calls will fail");
        }
        Gl { _loaded: () }
    }

    /// Reads a `glGetString` value such as `gl::VERSION`.
    pub fn get_string(&self, name: GLenum) -> Option<String> {
        let value = unsafe { gl::GetString(name) };
        if value.is_null() {
            return None;
        }

        let value = unsafe { CStr::from_ptr(value as *const c_char) };
        Some(value.to_string_lossy().into_owned())
    }
}

impl GlBackend for Gl {
    fn create_shader(&self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }
        success != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }

        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader, capacity, written, buffer);
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        success != 0
    }

    fn validate_program(&self, program: GLuint) {
        unsafe { gl::ValidateProgram(program) }
    }

    fn program_validate_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut success);
        }
        success != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }

        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(program, capacity, written, buffer);
        })
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }
}

/// Fetches an info log of `len` bytes (NUL included) through `fetch`.
fn read_info_log<F>(len: GLint, fetch: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    let mut buffer = vec![0u8; len.max(1) as usize];
    let mut written: GLsizei = 0;
    fetch(
        buffer.len() as GLsizei,
        &mut written,
        buffer.as_mut_ptr() as *mut GLchar,
    );

    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_owned()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_info_log_trims_to_written_length() {
        let log = read_info_log(16, |capacity, written, buffer| {
            assert_eq!(capacity, 16);
            let text = b"bad token\n\0";
            unsafe {
                ptr::copy_nonoverlapping(text.as_ptr(), buffer as *mut u8, text.len());
                *written = (text.len() - 1) as GLsizei;
            }
        });

        assert_eq!(log, "bad token");
    }

    #[test]
    fn test_read_info_log_empty() {
        let log = read_info_log(0, |capacity, written, _buffer| {
            assert_eq!(capacity, 1);
            unsafe { *written = 0 };
        });

        assert!(log.is_empty());
    }
}
