//! Manifest writing API.
//!
//! Module-definition files are always written with CRLF line endings,
//! whatever platform produced them.

use crate::{Error, Manifest};
use camino::Utf8Path;
use std::fs;
use std::io::Write as IoWrite;

/// Translate every `\n` into `\r\n`, leaving all other bytes untouched
pub fn to_crlf(text: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(text.len() + text.matches('\n').count());

    for byte in text.bytes() {
        if byte == b'\n' {
            data.push(b'\r');
        }
        data.push(byte);
    }

    data
}

/// Write manifest text to `path` with CRLF line endings.
///
/// The parent directory must already exist.
pub fn write_manifest(text: &str, path: &Utf8Path) -> Result<usize, Error> {
    let data = to_crlf(text);
    let to_write_error = |source| Error::Write {
        path: path.to_owned(),
        source,
    };

    let mut file = fs::File::create(path).map_err(to_write_error)?;
    file.write_all(&data).map_err(to_write_error)?;
    file.flush().map_err(to_write_error)?;
    file.sync_all().map_err(to_write_error)?;

    Ok(data.len())
}

impl Manifest {
    /// Render and write the manifest, returning the number of bytes written
    pub fn write_to_file(&self, path: &Utf8Path) -> Result<usize, Error> {
        write_manifest(&self.render(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_crlf_translation() {
        assert_eq!(to_crlf("a\nb\n"), b"a\r\nb\r\n");
        assert_eq!(to_crlf("\tx y;"), b"\tx y;");
        assert_eq!(to_crlf(""), b"");
    }

    #[test]
    fn test_written_file_has_only_crlf() {
        let temp = TempDir::new().unwrap();
        let path = utf8_root(&temp).join("out.def");
        let text = "; header\n\nLIBRARY lib\nEXPORTS\n\n; Section\n\n\tsym\n";

        let written = write_manifest(text, &path).unwrap();
        let data = fs::read(&path).unwrap();

        assert_eq!(written, data.len());
        assert_eq!(data.len(), text.len() + text.matches('\n').count());
        for (i, byte) in data.iter().enumerate() {
            if *byte == b'\n' {
                assert_eq!(data[i - 1], b'\r');
            }
        }
        let restored = String::from_utf8(data).unwrap().replace("\r\n", "\n");
        assert_eq!(restored, text);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp = TempDir::new().unwrap();
        let path = utf8_root(&temp).join("no/such/dir/out.def");

        let result = write_manifest("x\n", &path);
        assert!(matches!(result, Err(Error::Write { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = utf8_root(&temp).join("out.def");
        fs::write(&path, "stale contents that are longer than the new ones\n").unwrap();

        write_manifest("new\n", &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new\r\n");
    }
}
