//! Line-oriented file reading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::JoinError;

/// Progress is logged every this many lines.
pub const PROGRESS_INTERVAL: usize = 100_000;

/// Read all lines of a file, in order, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>, JoinError> {
    let read_error = |e: std::io::Error| JoinError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    log::info!("reading {}", path.display());
    let reader = BufReader::new(File::open(path).map_err(read_error)?);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line.map_err(read_error)?);
        if lines.len() % PROGRESS_INTERVAL == 0 {
            log::info!("read {} lines from {}", lines.len(), path.display());
        }
    }

    log::debug!("read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a;1\r\nb;2\n\nc;3").unwrap();

        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["a;1", "b;2", "", "c;3"]);
    }

    #[test]
    fn test_read_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_lines(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_lines(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, JoinError::Read { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
