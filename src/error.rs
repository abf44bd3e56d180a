use derive_more::{Display, From};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
    #[from(skip)]
    #[display("{_0}")]
    Custom(String),

    #[display("I/O error: {_0}")]
    Io(std::io::Error),

    #[display("JSON error: {_0}")]
    Json(serde_json::Error),
}

impl Error {
    pub fn custom(val: impl std::fmt::Display) -> Self {
        Self::Custom(val.to_string())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Custom(_) => None,
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
        }
    }
}
