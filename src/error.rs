/*!
Error types shared by the header codec, the bank loader and the load pipeline.

Fatal errors (`LoadError`) abort a load and no partial plan is returned.
`UnsupportedMapper` is advisory: the pipeline records it and continues with an
empty bank plan.
*/

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
#[must_use]
pub enum LoadError {
    #[error("not an iNES image (expected `NES<1A>` magic)")]
    NotInes,
    #[error("truncated input: need {needed} bytes for the iNES header, found {found}")]
    TruncatedInput { needed: usize, found: usize },
    #[error(
        "read of {len} bytes at file offset {offset:#010x} exceeds file length {file_len} (corrupt ROM image?)"
    )]
    OutOfRange {
        offset: u32,
        len: u32,
        file_len: usize,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn io(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// The header names a mapper with no known boot-time bank layout.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("mapper {0} is not supported by this loader")]
pub struct UnsupportedMapper(pub u8);

impl UnsupportedMapper {
    pub fn mapper_id(&self) -> u8 {
        self.0
    }
}
