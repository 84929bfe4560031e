use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Common interface for structure file readers.
///
/// Implementors only provide [`read_from`](StructureReader::read_from); reading from a
/// string or a file path is derived from it.
pub trait StructureReader {
    /// The model produced by a successful read.
    type Output;

    /// The error type for parse and I/O failures.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is malformed or the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Reads a structure from in-memory text.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is malformed.
    fn read_from_str(text: &str) -> Result<Self::Output, Self::Error> {
        let mut reader = text.as_bytes();
        Self::read_from(&mut reader)
    }

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
