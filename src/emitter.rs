//! Chooses between raw passthrough and column selection.

use crate::config::WatchConfig;
use crate::selector::ColumnSelector;

/// Turns appended chunks into output bytes.
#[derive(Debug, Clone)]
pub enum Emitter {
    /// No column filter: chunks are echoed unchanged.
    Passthrough,
    /// Only the selected columns of completed rows are emitted.
    Columns(ColumnSelector),
}

impl Emitter {
    /// Passthrough when `config` selects no columns, column selection otherwise.
    pub fn new(config: &WatchConfig) -> Self {
        if config.is_passthrough() {
            Emitter::Passthrough
        } else {
            Emitter::Columns(ColumnSelector::new(config))
        }
    }

    /// Process one chunk, returning the bytes to write (possibly empty).
    pub fn emit(&mut self, chunk: &[u8]) -> Vec<u8> {
        match self {
            Emitter::Passthrough => chunk.to_vec(),
            Emitter::Columns(selector) => selector.feed(chunk).concat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineBreak;

    #[test]
    fn test_passthrough_identity() {
        let config = WatchConfig::builder().build().unwrap();
        let mut emitter = Emitter::new(&config);
        assert!(matches!(emitter, Emitter::Passthrough));

        let inputs: [&[u8]; 4] = [b"a,b,c\n", b"partial,ro", b"w\r\n", b"\0\xff binary"];
        for input in inputs {
            assert_eq!(emitter.emit(input), input.to_vec());
        }
    }

    #[test]
    fn test_column_mode() {
        let config = WatchConfig::builder()
            .columns([1])
            .line_break(LineBreak::Lf)
            .build()
            .unwrap();
        let mut emitter = Emitter::new(&config);
        assert!(matches!(emitter, Emitter::Columns(_)));

        assert_eq!(emitter.emit(b"v0,v"), b"".to_vec());
        assert_eq!(emitter.emit(b"1,v2\nw0,w1"), b"v1\n".to_vec());
        assert_eq!(emitter.emit(b",w2\n"), b"w1\n".to_vec());
    }
}
