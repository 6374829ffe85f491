use std::ffi::NulError;
use std::path::PathBuf;
use thiserror::Error;

use super::stage::ShaderStage;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to read shader file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shader source contains a null byte")]
    Nul(#[from] NulError),

    #[error("Failed to create {0} object")]
    ObjectCreation(&'static str),

    #[error("Failed to compile {stage} shader\n{log}")]
    Compilation { stage: ShaderStage, log: String },

    #[error("Program linking failed\n{0}")]
    Linking(String),
}

impl ShaderError {
    /// Whether this error was already written to the log where it occurred.
    ///
    /// Compile and link failures carry the driver's info log and are logged
    /// by [`Shader::compile`](super::Shader::compile) and
    /// [`Program::new`](super::Program::new) themselves.
    pub fn is_logged(&self) -> bool {
        matches!(
            self,
            ShaderError::Compilation { .. } | ShaderError::Linking(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::ffi::CString;
    use std::io;

    #[test]
    fn test_io_message_does_not_repeat_source() {
        let error = ShaderError::Io {
            path: PathBuf::from("/nonexistent/x.shader"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };

        let chain = format!("{:#}", anyhow::Error::new(error));
        assert_eq!(
            chain,
            "Failed to read shader file \"/nonexistent/x.shader\": No such file or directory"
        );
        assert_eq!(chain.matches("No such file").count(), 1);
    }

    #[test]
    fn test_nul_message_does_not_repeat_source() {
        let nul = CString::new("void main() {}\0").unwrap_err();
        let error = ShaderError::from(nul);

        assert!(error.source().is_some());
        let message = error.to_string();
        let source = error.source().map(|source| source.to_string()).unwrap();
        assert!(!message.contains(&source));
    }

    #[test]
    fn test_only_driver_diagnostics_are_logged() {
        let compile = ShaderError::Compilation {
            stage: ShaderStage::Vertex,
            log: "error".into(),
        };
        assert!(compile.is_logged());
        assert!(ShaderError::Linking("error".into()).is_logged());
        assert!(!ShaderError::ObjectCreation("program").is_logged());

        let io = ShaderError::Io {
            path: PathBuf::from("basic.shader"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(!io.is_logged());
    }
}
