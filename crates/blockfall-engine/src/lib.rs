pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridSizeError {
    #[display(
        "grid width must be between {} and {}, got {width}",
        GridSize::MIN_WIDTH,
        GridSize::MAX_DIMENSION
    )]
    Width { width: usize },
    #[display(
        "grid height must be between {} and {}, got {height}",
        GridSize::MIN_HEIGHT,
        GridSize::MAX_DIMENSION
    )]
    Height { height: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed '{input}': expected 32 hexadecimal digits")]
pub struct ParsePieceSeedError {
    input: String,
}

impl ParsePieceSeedError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}
