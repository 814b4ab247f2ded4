//! Reading header and implementation files.

use crate::Error;
use camino::Utf8Path;
use std::fs;
use tracing::debug;

/// Read a source file as text with `\r\n` line endings folded to `\n`
pub(crate) fn read_text(path: &Utf8Path) -> Result<String, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;

    debug!("Read {} bytes from {}", content.len(), path);

    Ok(normalize_newlines(content))
}

/// Fold Windows line endings so line-anchored patterns see plain `\n`
pub(crate) fn normalize_newlines(content: String) -> String {
    if content.contains("\r\n") {
        content.replace("\r\n", "\n")
    } else {
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_crlf() {
        let text = normalize_newlines("int a(void);\r\nint b(void);\r\n".to_string());
        assert_eq!(text, "int a(void);\nint b(void);\n");
    }

    #[test]
    fn test_lone_carriage_return_is_kept() {
        let text = normalize_newlines("a\rb\n".to_string());
        assert_eq!(text, "a\rb\n");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp.path().join("missing.h")).unwrap();

        let err = read_text(&path).unwrap_err();
        match err {
            Error::Read { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
