//! SystemID error types.

/// Errors that can occur while decoding, guarding or persisting a record.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raw image has the wrong length for this build's layout.
    #[error("invalid record length: expected {expected} bytes, got {actual}")]
    Format { expected: usize, actual: usize },

    /// Stored checksum does not match the record contents.
    #[error("CRC invalid: stored {stored:08X} != computed {computed:08X}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// Storage read or write failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The wall clock could not be read or decomposed.
    #[error("clock unavailable: {0}")]
    Clock(String),

    /// MAC slot index outside the table.
    #[error("MAC slot {slot} out of range (capacity {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },
}

impl Error {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for SystemID operations.
pub type Result<T> = std::result::Result<T, Error>;
