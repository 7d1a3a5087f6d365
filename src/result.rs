use std::fmt::Display;

use miette::miette;

/// Errors the per-clip workflow needs to tell apart.
///
/// Transport and lookup failures fail the current clip but are recorded
/// by the batch driver instead of aborting the run.
#[derive(Debug)]
pub enum Error {
    /// The server answered with a non-success status code
    Status { url: String, code: u16 },

    /// The clip page did not carry a usable embedded payload
    Payload(String),

    /// None of the known quality tiers was present in a media descriptor
    NoQuality,

    /// The requested acquisition strategy is not implemented
    Unsupported(&'static str),

    Miette(miette::Report),
}

impl From<miette::Report> for Error {
    fn from(err: miette::Report) -> Self {
        Error::Miette(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Miette(miette::Report::msg(err))
    }
}

impl From<Error> for miette::Report {
    fn from(err: Error) -> Self {
        match err {
            Error::Miette(err) => err,
            err => miette!("{err}"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Status { url, code } => write!(f, "Failed download of {url} - {code}"),
            Error::Payload(what) => write!(f, "Clip page payload: {what}"),
            Error::NoQuality => write!(f, "Found no acceptable quality"),
            Error::Unsupported(what) => write!(f, "{what} is not supported"),
            Error::Miette(report) => write!(f, "{report}"),
        }
    }
}

impl Error {
    pub fn wrap_err_with<D, F>(self, f: F) -> Error
    where
        D: Display + Send + Sync + 'static,
        F: FnOnce() -> D,
    {
        match self {
            Error::Miette(report) => Error::Miette(report.wrap_err(f())),
            err => err,
        }
    }
}

pub fn bail<T>(msg: impl Display) -> Result<T> {
    Err(Error::Miette(miette!("{msg}")))
}

pub type Result<T> = std::result::Result<T, Error>;
