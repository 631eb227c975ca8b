//! Error taxonomy for the measurement engine and trace storage.
//!
//! Measurement and demodulation operations are total over well-formed
//! inputs and never return errors for empty or boundary data; those
//! produce the degenerate values documented on each operation. Errors
//! here cover invalid configuration and storage failures only.

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("invalid parameter: {what}"))]
    InvalidParameter { what: String },

    #[snafu(display("unsupported record version {version}"))]
    UnsupportedFormat { version: u32 },

    #[snafu(display("record truncated at byte {offset}"))]
    TruncatedRecord { offset: usize },

    #[snafu(display("i/o error: {source}"))]
    Io { source: std::io::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
