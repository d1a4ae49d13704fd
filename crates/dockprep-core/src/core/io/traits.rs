use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for line-oriented text files read and written whole.
///
/// Implementors provide the reader/writer based methods; the path-based helpers
/// open, buffer and flush the underlying file.
pub trait RecordFile: Sized {
    /// The error type for I/O and format failures.
    type Error: Error + From<io::Error>;

    /// Reads a value from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is malformed.
    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error>;

    /// Writes the value to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a value from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its content is malformed.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes the value to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
