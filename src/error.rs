use thiserror::Error;

/// Why a textual map could not be turned into a [`Game`](crate::Game).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMapError {
    #[error("Row {row} has {width} tiles, expecting {expected}")]
    NotRectangular {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("Expecting 1 or 2 block tiles, found {0}")]
    BlockCount(usize),

    #[error("Undeclared symbol: {0:?}")]
    UndeclaredSymbol(char),

    #[error("Block tiles do not form a single placement")]
    DetachedBlock,

    #[error("Codec symbols must be distinct and the row separator non-empty")]
    AmbiguousCodec,
}
