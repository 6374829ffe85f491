//! Splitting of a single `.shader` file into its vertex and fragment sections.
//!
//! A section starts at a line containing `#shader` together with `vertex` or
//! `fragment` and runs up to the next marker line. Marker lines themselves are
//! never part of a section.

use std::fs;
use std::path::Path;

use super::error::ShaderError;
use super::stage::ShaderStage;

/// Token that turns a line into a marker line.
pub const MARKER: &str = "#shader";

/// Section currently receiving lines while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionTag {
    None,
    Vertex,
    Fragment,
}

impl SectionTag {
    /// Section selected by a marker line, `None` if it names neither stage.
    fn from_marker(line: &str) -> Option<Self> {
        if line.contains("vertex") {
            Some(SectionTag::Vertex)
        } else if line.contains("fragment") {
            Some(SectionTag::Fragment)
        } else {
            None
        }
    }
}

/// Vertex and fragment source text read from one shader file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    vertex_text: String,
    fragment_text: String,
}

impl ShaderSource {
    pub fn new(vertex_text: impl Into<String>, fragment_text: impl Into<String>) -> Self {
        Self {
            vertex_text: vertex_text.into(),
            fragment_text: fragment_text.into(),
        }
    }

    /// Splits `text` into its two sections.
    ///
    /// Every line routed to a section gets a trailing `\n`. Lines seen before
    /// the first recognized marker are dropped, and a marker naming neither
    /// stage keeps the current section.
    pub fn parse(text: &str) -> Self {
        let mut vertex_text = String::new();
        let mut fragment_text = String::new();
        let mut tag = SectionTag::None;

        for line in text.split_terminator('\n') {
            if line.contains(MARKER) {
                if let Some(next) = SectionTag::from_marker(line) {
                    tag = next;
                }
                continue;
            }

            let section = match tag {
                SectionTag::None => continue,
                SectionTag::Vertex => &mut vertex_text,
                SectionTag::Fragment => &mut fragment_text,
            };
            section.push_str(line);
            section.push('\n');
        }

        Self {
            vertex_text,
            fragment_text,
        }
    }

    /// Reads and parses a shader file.
    ///
    /// Only a failed read is an error. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD instead of rejecting the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loaded shader source from {:?}", path);
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn vertex_text(&self) -> &str {
        &self.vertex_text
    }

    pub fn fragment_text(&self) -> &str {
        &self.fragment_text
    }

    pub fn text(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex_text,
            ShaderStage::Fragment => &self.fragment_text,
        }
    }
}
