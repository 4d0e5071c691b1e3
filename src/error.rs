//! Crate error type

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building an engine or persisting settings.
///
/// Once running, the simulation itself has no failure modes.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable drawable surface (missing element, wrong element type, no 2D context).
    #[error("surface unavailable: {0}")]
    Surface(String),

    /// Settings out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Palette entry that is not a `#rrggbb` / `#rgb` hex color.
    #[error("invalid color `{0}`")]
    InvalidColor(String),

    /// Settings could not be written to (or read from) persistent storage.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// Malformed settings JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_informative() {
        let e = Error::InvalidSettings("density_divisor must be > 0".to_string());
        let msg = e.to_string();
        assert!(msg.contains("invalid settings"));
        assert!(msg.contains("density_divisor"));

        let e = Error::Surface("no element with id `canvas`".to_string());
        assert!(e.to_string().starts_with("surface unavailable"));

        let e = Error::Storage("quota exceeded".to_string());
        assert_eq!(e.to_string(), "storage unavailable: quota exceeded");
    }

    #[test]
    fn test_json_error_converts() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
