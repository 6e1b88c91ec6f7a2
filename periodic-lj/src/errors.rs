#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value in a function (negative cutoff,
    /// non-finite value, ...)
    InvalidParameter(String),
    /// Some input array does not have the expected shape
    InvalidShape(String),
    /// A matrix could not be inverted
    LinearAlgebra(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::InvalidShape(e) => write!(f, "invalid shape: {}", e),
            Error::LinearAlgebra(e) => write!(f, "linear algebra error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidParameter(_) |
            Error::InvalidShape(_) |
            Error::LinearAlgebra(_) => None,
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

/// Check that `value` is a finite, strictly positive number, and return an
/// `Error::InvalidParameter` mentioning `name` otherwise.
pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), Error> {
    if !(value.is_finite() && value > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "expected a positive finite value for {}, got {}", name, value
        )));
    }
    return Ok(());
}

/// Check that `value` is a finite, non-negative number, and return an
/// `Error::InvalidParameter` mentioning `name` otherwise.
pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<(), Error> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(Error::InvalidParameter(format!(
            "expected a non-negative finite value for {}, got {}", name, value
        )));
    }
    return Ok(());
}
