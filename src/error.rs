use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid cpu subtype given: `{0}`")]
    InvalidSubtype(String),

    #[error("opening file '{path}' failed")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading header failed")]
    Read(#[source] std::io::Error),

    #[error("invalid header magic: {0:#x}")]
    InvalidMagic(u32),

    #[error("writing header failed")]
    Write(#[source] std::io::Error),

    #[error("header truncated: need {needed} bytes, have {available}")]
    TruncatedInput { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_cause_is_not_repeated_in_message() {
        let err = Error::Open {
            path: PathBuf::from("/nonexistent/x"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "opening file '/nonexistent/x' failed");

        let chained = format!("{:#}", anyhow::Error::from(err));
        let cause = std::io::Error::from(std::io::ErrorKind::NotFound).to_string();
        assert_eq!(chained.matches(&cause).count(), 1);
    }
}
