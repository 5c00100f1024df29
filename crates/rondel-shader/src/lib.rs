//! Splitter for `#shader`-sectioned shader source files.
//!
//! A file holds one vertex and one fragment section, each introduced by a
//! directive line:
//!
//! ```text
//! #shader vertex
//! ...vertex stage source...
//! #shader fragment
//! ...fragment stage source...
//! ```
//!
//! There is no escaping, no include mechanism and no multi-pass support.
//!
//! # Quick start
//!
//! ```rust
//! use rondel_shader::split_sections;
//!
//! let src = split_sections("#shader vertex\nv\n#shader fragment\nf\n").unwrap();
//! assert_eq!(src.vertex, "v\n");
//! assert_eq!(src.fragment, "f\n");
//! ```

pub mod error;
pub mod parser;

use std::path::Path;

pub use error::{LoadError, ParseError};
pub use parser::{split_sections, ShaderSource, ShaderStage};

/// Reads `path` and splits it into stage sections.
pub fn load(path: impl AsRef<Path>) -> Result<ShaderSource, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    split_sections(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
