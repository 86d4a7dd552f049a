//! IPv4 forwarding control.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::NetworkError;

/// Enable IPv4 forwarding by writing `1` to the kernel control file.
///
/// The file is not read back.
pub fn enable_ipv4_forwarding(path: impl AsRef<Path>) -> Result<(), NetworkError> {
    let path = path.as_ref();
    let err = |source: std::io::Error| NetworkError::ForwardingWrite {
        path: path.display().to_string(),
        source,
    };

    let mut file = OpenOptions::new().write(true).open(path).map_err(err)?;
    file.write_all(b"1").map_err(err)?;

    info!(path = %path.display(), "IPv4 forwarding enabled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_single_one() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ip_forward");
        std::fs::write(&path, "").unwrap();

        enable_ipv4_forwarding(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");
    }

    #[test]
    fn test_missing_control_file() {
        let dir = tempdir().unwrap();
        let err = enable_ipv4_forwarding(dir.path().join("ip_forward")).unwrap_err();
        assert_eq!(err.reason_code(), "forwarding_write_failed");
    }
}
