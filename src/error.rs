// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// An asset id that is not present in the catalog. This is a
    /// programming-error class: the input surface only ever offers ids the
    /// catalog handed out.
    NotFound(String),
    /// The catalog contains no assets, so no viewing session can start.
    EmptyCatalog,
    Io(String),
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(id) => write!(f, "Unknown asset id: {id}"),
            Error::EmptyCatalog => write!(f, "Catalog contains no assets"),
            Error::Io(e) => write!(f, "I/O Error: {e}"),
            Error::Parse(e) => write!(f, "Parse Error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
