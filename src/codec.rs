use std::borrow::Cow;

use crate::{InvalidMapError, Tile};

/// Symbol table between textual maps and [`Tile`]s.
///
/// Each tile kind has one character. Tiles in a row are separated by
/// `col_sep` and rows by `row_sep`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    symbols: [char; 4],
    col_sep: String,
    row_sep: String,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            symbols: ['X', 'O', 'S', 'G'],
            col_sep: " ".into(),
            row_sep: "\n".into(),
        }
    }
}

impl Codec {
    pub fn new(
        empty: char,
        safe: char,
        block: char,
        goal: char,
        col_sep: impl Into<String>,
        row_sep: impl Into<String>,
    ) -> Result<Self, InvalidMapError> {
        let codec = Self {
            symbols: [empty, safe, block, goal],
            col_sep: col_sep.into(),
            row_sep: row_sep.into(),
        };
        let symbols = &codec.symbols;
        let distinct = (0..4).all(|i| !symbols[i + 1..].contains(&symbols[i]));
        let in_separator = symbols
            .iter()
            .any(|&ch| codec.col_sep.contains(ch) || codec.row_sep.contains(ch));
        let nested_separators = !codec.col_sep.is_empty()
            && (codec.row_sep.contains(&codec.col_sep) || codec.col_sep.contains(&codec.row_sep));
        if !distinct || in_separator || nested_separators || codec.row_sep.is_empty() {
            return Err(InvalidMapError::AmbiguousCodec);
        }
        Ok(codec)
    }

    pub fn col_sep(&self) -> &str {
        &self.col_sep
    }

    pub fn row_sep(&self) -> &str {
        &self.row_sep
    }

    pub fn encode(&self, tile: Tile) -> char {
        self.symbols[tile as usize]
    }

    pub fn decode(&self, ch: char) -> Option<Tile> {
        let idx = self.symbols.iter().position(|&sym| sym == ch)?;
        Some(Tile::ALL[idx])
    }

    /// Rows of tile symbols, with the column separators stripped.
    pub(crate) fn rows<'a>(&self, text: &'a str) -> Vec<Cow<'a, str>> {
        if self.col_sep.is_empty() {
            return text.split(self.row_sep.as_str()).map(Cow::Borrowed).collect();
        }
        text.split(self.row_sep.as_str())
            .map(|row| Cow::Owned(row.replace(self.col_sep.as_str(), "")))
            .collect()
    }

    /// Check that `text` is rectangular, holds one or two block tiles and
    /// uses only declared symbols.
    pub fn check(&self, text: &str) -> Result<(), InvalidMapError> {
        let rows = self.rows(text);
        let expected = rows.first().map_or(0, |row| row.chars().count());
        for (row, line) in rows.iter().enumerate().skip(1) {
            let width = line.chars().count();
            if width != expected {
                return Err(InvalidMapError::NotRectangular {
                    row,
                    width,
                    expected,
                });
            }
        }

        let block = self.encode(Tile::Block);
        let blocks = text.chars().filter(|&ch| ch == block).count();
        if !(1..=2).contains(&blocks) {
            return Err(InvalidMapError::BlockCount(blocks));
        }

        if let Some(ch) = rows
            .iter()
            .flat_map(|row| row.chars())
            .find(|&ch| self.decode(ch).is_none())
        {
            return Err(InvalidMapError::UndeclaredSymbol(ch));
        }
        Ok(())
    }

    pub fn validate(&self, text: &str) -> bool {
        self.check(text).is_ok()
    }
}
