//! Stateful column filter that survives arbitrary chunk boundaries.
//!
//! A column's bytes may arrive across several poll cycles, so the selector
//! keeps a [`RowCursor`] between calls to [`ColumnSelector::feed`]. Output is
//! identical no matter how the byte stream is split into chunks.

use crate::config::{LineBreak, WatchConfig};
use crate::tokenizer::{Boundary, strip_carriage_returns, tokenize};

/// Position within the row currently being scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCursor {
    /// 0-based index of the column being scanned.
    pub current_column: usize,
    /// Index into the selected column list; reset at every line break.
    pub selector_pointer: usize,
    /// Bytes of the current column seen so far without a boundary.
    pub pending: Vec<u8>,
}

impl RowCursor {
    fn next_row(&mut self) {
        self.current_column = 0;
        self.selector_pointer = 0;
        self.pending.clear();
    }
}

/// Emits only the selected columns of each completed row.
#[derive(Debug, Clone)]
pub struct ColumnSelector {
    columns: Vec<usize>,
    delimiter: u8,
    line_break: LineBreak,
    cursor: RowCursor,
}

impl ColumnSelector {
    /// Create a selector for the columns in `config`, starting at the first row.
    pub fn new(config: &WatchConfig) -> Self {
        Self {
            columns: config.columns().to_vec(),
            delimiter: config.delimiter(),
            line_break: config.line_break(),
            cursor: RowCursor::default(),
        }
    }

    /// Current position within the row being scanned.
    pub fn cursor(&self) -> &RowCursor {
        &self.cursor
    }

    /// Consume one chunk and return the output units it completed.
    ///
    /// Selected columns of a row are joined with the delimiter and the row is
    /// closed with the line terminator. Rows with no selected column emit nothing.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut rest = chunk;

        while !rest.is_empty() {
            let token = tokenize(rest, self.delimiter);
            rest = &rest[token.consumed..];

            match token.boundary {
                Boundary::Delimiter => {
                    if self.is_selected() {
                        let mut column = std::mem::take(&mut self.cursor.pending);
                        column.extend_from_slice(&token.text);
                        out.push(self.take_column(column));
                    }
                    self.cursor.pending.clear();
                    self.cursor.current_column += 1;
                }
                Boundary::LineBreak => {
                    if self.is_selected() {
                        let mut column = std::mem::take(&mut self.cursor.pending);
                        column.extend_from_slice(&token.text);
                        let column = strip_carriage_returns(&column).into_owned();
                        out.push(self.take_column(column));
                    }
                    if self.cursor.selector_pointer > 0 {
                        out.push(self.line_break.as_bytes().to_vec());
                    }
                    self.cursor.next_row();
                }
                Boundary::Unterminated => {
                    // Unselected columns are skipped, so only buffer what will be emitted.
                    if self.is_selected() {
                        self.cursor.pending.extend_from_slice(&token.text);
                    }
                }
            }
        }

        out
    }

    fn is_selected(&self) -> bool {
        self.columns.get(self.cursor.selector_pointer) == Some(&self.cursor.current_column)
    }

    fn take_column(&mut self, column: Vec<u8>) -> Vec<u8> {
        let unit = if self.cursor.selector_pointer > 0 {
            let mut unit = Vec::with_capacity(column.len() + 1);
            unit.push(self.delimiter);
            unit.extend_from_slice(&column);
            unit
        } else {
            column
        };
        self.cursor.selector_pointer += 1;
        unit
    }
}
