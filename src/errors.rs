//! The one error type shared by every stage of the renderer.

use std::io;

/// Everything that can go wrong between reading the command line and
/// closing the output file.  Configuration-file failures are
/// recoverable (the caller falls back to the defaults); everything
/// else ends the run.
#[derive(Debug, Fail)]
pub enum Error {
    /// A command-line argument could not be parsed.
    #[fail(display = "Could not parse {}: {:?}", what, input)]
    Usage {
        /// Which argument was malformed.
        what: &'static str,
        /// The text as given.
        input: String,
    },

    /// The configuration file could not be opened or read.
    #[fail(display = "Could not read configuration file {}: {}", path, cause)]
    ConfigOpen {
        /// The path we tried.
        path: String,
        /// The underlying failure.
        #[cause]
        cause: io::Error,
    },

    /// A line of the configuration file did not parse.
    #[fail(display = "Configuration line {}: expected {}, found {:?}", line, expected, found)]
    ConfigLine {
        /// One-based line number.
        line: usize,
        /// What that line should hold.
        expected: &'static str,
        /// What it actually held.
        found: String,
    },

    /// The pixel buffer could not be allocated.
    #[fail(display = "Could not allocate {} pixel records", records)]
    Allocation {
        /// The number of records requested.
        records: usize,
    },

    /// The output file could not be created.
    #[fail(display = "Could not open {} for writing: {}", path, cause)]
    OutputOpen {
        /// The output path.
        path: String,
        /// The underlying failure.
        #[cause]
        cause: io::Error,
    },

    /// Writing the image failed part way through.
    #[fail(display = "Write failure: {}", _0)]
    Write(#[cause] io::Error),

    /// One of the render threads panicked.
    #[fail(display = "A render worker panicked")]
    WorkerPanic,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Write(err)
    }
}
