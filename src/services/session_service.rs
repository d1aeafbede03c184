use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read token file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read the auth token once at startup.
///
/// A missing or blank file means "logged out" and is not an error.
pub fn load_token(path: &Path) -> Result<Option<String>, SessionError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No token file at {}, starting logged out", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(SessionError::Read {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    let token = contents.trim();
    if token.is_empty() {
        debug!("Token file {} is empty, starting logged out", path.display());
        return Ok(None);
    }

    info!("Found auth token in {}", path.display());
    Ok(Some(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pleb_wallet_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_logged_out() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(load_token(&path).unwrap(), None);
    }

    #[test]
    fn test_token_is_trimmed() {
        let path = temp_path("token");
        std::fs::write(&path, "  abc.def \n").unwrap();
        assert_eq!(load_token(&path).unwrap(), Some("abc.def".to_string()));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_blank_file_is_logged_out() {
        let path = temp_path("blank");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load_token(&path).unwrap(), None);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_directory_is_an_error() {
        let dir = std::env::temp_dir();
        assert!(load_token(&dir).is_err());
    }
}
