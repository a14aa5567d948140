use std::{fs::File, io::{Write, BufWriter}, path::Path};
use anyhow::Result;
use regex::Regex;
use lazy_static::lazy_static;

use located_error::LocatedError;

mod error;
pub use error::WriterError;

/// Field separator of every file written through a [`GenericWriter`].
pub const WRITER_SEPARATOR: &str = "\t";

/// Buffered writer of tabular results, either to a file or to stdout.
pub struct GenericWriter<'a> {
    source: BufWriter<Box<dyn Write + 'a>>
}

impl<'a> GenericWriter<'a> {
    /// Instantiate a new `GenericWriter`. Writes to stdout if `path` is `None`.
    ///
    /// # Errors
    /// if `path` is either an invalid file, or the user does not have the proper
    /// UNIX permissions to write at this location.
    pub fn new(path: Option<impl AsRef<Path>>) -> Result<GenericWriter<'a>> {
        use WriterError::IOError;
        let source: Box<dyn Write + 'a> = match path {
            Some(path) => Box::new(File::create(path).map_err(IOError).loc("While creating file")?),
            None       => Box::new(std::io::stdout()),
        };
        Ok(GenericWriter{source: BufWriter::new(source)})
    }

    /// Write every item of `iter` on its own line, and flush.
    ///
    /// Pretty-printed field separators (`[ ]+-[ ]+`) are replaced with [`WRITER_SEPARATOR`], and trailing
    /// padding is removed.
    ///
    /// # Errors
    /// - If any of the items fails to get written.
    pub fn write_iter<T, I>(&mut self, iter: T) -> Result<()>
    where   T: IntoIterator<Item = I>,
            I: std::fmt::Display,
    {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"[ ]+-[ ]+").expect("Failed to parse regex.");
        }
        for obj in iter {
            let line = obj.to_string();
            let line = RE.replace_all(line.trim_end(), WRITER_SEPARATOR);
            writeln!(self.source, "{line}").map_err(WriterError::IOError).loc("While writing contents into file")?;
        }
        self.source.flush().loc("While flushing buffer contents of Writer")
    }
}
