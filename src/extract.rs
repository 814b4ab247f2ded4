//! Declaration extractor.
//!
//! Scrapes public function names out of C headers. Headers are expected to
//! declare one function per statement with the return type starting the line:
//!
//! ```text
//! fz_context *fz_new_context(const fz_alloc_context *alloc, size_t max_store);
//! const char *fz_version(void);
//! ```
//!
//! Debug-only, ARM-only and lock-debugging blocks are cut out first so their
//! declarations never reach the export list.

use crate::internal::patterns::{CONDITIONAL_BLOCKS, DECLARATION, NORETURN_ANNOTATION};
use crate::internal::source::read_text;
use crate::{Error, ExclusionSet};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;
use walkdir::WalkDir;

/// A header file, or a directory of headers scanned recursively
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSource {
    File(Utf8PathBuf),
    Directory(Utf8PathBuf),
}

impl HeaderSource {
    /// Classify an existing path. Symlinks are followed.
    pub fn probe(path: &Utf8Path) -> Result<Self, Error> {
        let metadata = fs::metadata(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;

        if metadata.is_dir() {
            Ok(Self::Directory(path.to_owned()))
        } else {
            Ok(Self::File(path.to_owned()))
        }
    }

    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::File(path) | Self::Directory(path) => path,
        }
    }
}

/// Extract exported function names from a header file or directory.
///
/// Directory entries are visited in file-name order, each one recursively.
pub fn extract_exports(
    source: &Utf8Path,
    exclusions: &ExclusionSet,
) -> Result<Vec<String>, Error> {
    match HeaderSource::probe(source)? {
        HeaderSource::Directory(dir) => {
            let mut names = Vec::new();
            for entry in directory_entries(&dir)? {
                names.extend(extract_exports(&entry, exclusions)?);
            }
            Ok(names)
        }
        HeaderSource::File(file) => {
            let content = read_text(&file)?;
            let names = extract_from_text(&content, exclusions);
            debug!("Extracted {} declarations from {}", names.len(), file);
            Ok(names)
        }
    }
}

/// Extract exported function names from header text
pub fn extract_from_text(content: &str, exclusions: &ExclusionSet) -> Vec<String> {
    declared_functions(&strip_noreturn(&strip_conditional_blocks(content)))
        .into_iter()
        .filter(|name| !exclusions.contains(name))
        .collect()
}

/// Remove debug, ARM and lock-debugging conditional blocks
pub fn strip_conditional_blocks(content: &str) -> String {
    CONDITIONAL_BLOCKS
        .iter()
        .fold(content.to_string(), |text, block| {
            block.replace_all(&text, "").into_owned()
        })
}

/// Drop the noreturn annotation, keeping the statement terminator
pub fn strip_noreturn(content: &str) -> String {
    content.replace(NORETURN_ANNOTATION, ";")
}

/// Every function name matching the declaration pattern, in order
pub fn declared_functions(content: &str) -> Vec<String> {
    DECLARATION
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn directory_entries(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, Error> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path =
            Utf8PathBuf::try_from(entry.into_path()).map_err(|_| Error::InvalidPathUtf8)?;
        entries.push(path);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn none() -> ExclusionSet {
        ExclusionSet::new()
    }

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_simple_declarations_in_order() {
        let header = "int fz_foo(int a);\nint fz_bar(void);\n";
        assert_eq!(extract_from_text(header, &none()), vec!["fz_foo", "fz_bar"]);
    }

    #[test]
    fn test_debug_block_removed() {
        let header = "#ifndef NDEBUG\nint fz_dbg(void);\n#endif\nint fz_real(void);\n";
        assert_eq!(extract_from_text(header, &none()), vec!["fz_real"]);
    }

    #[test]
    fn test_exclusions_filter_names() {
        let header = "int fz_foo(int a);\nint fz_bar(void);\n";
        let exclusions: ExclusionSet = ["fz_bar"].into_iter().collect();
        assert_eq!(extract_from_text(header, &exclusions), vec!["fz_foo"]);
    }

    #[test]
    fn test_all_guard_kinds_stripped_globally() {
        let header = "\
#ifndef NDEBUG
void fz_dbg_one(void);
#endif
#ifdef ARCH_ARM
void fz_arm_only(void);
#endif
int fz_keep(void);
#ifdef FITZ_DEBUG_LOCKING
void fz_assert_lock_held(fz_context *ctx, int lock);
#endif
#ifndef NDEBUG
void fz_dbg_two(void);
#endif
";
        let stripped = strip_conditional_blocks(header);
        assert!(!stripped.contains("#ifndef NDEBUG"));
        assert!(!stripped.contains("#ifdef ARCH_ARM"));
        assert!(!stripped.contains("#ifdef FITZ_DEBUG_LOCKING"));
        assert_eq!(extract_from_text(header, &none()), vec!["fz_keep"]);
    }

    #[test]
    fn test_other_conditionals_untouched() {
        let header = "#ifdef HAVE_JS\nint pdf_js_supported(void);\n#endif\n";
        assert_eq!(extract_from_text(header, &none()), vec!["pdf_js_supported"]);
    }

    #[test]
    fn test_nested_guard_is_cut_at_first_endif() {
        // Textual stripping stops at the first #endif, leaving the tail of the outer block.
        let header = "\
#ifndef NDEBUG
#ifdef INNER
void fz_inner(void);
#endif
void fz_outer_tail(void);
#endif
";
        assert_eq!(extract_from_text(header, &none()), vec!["fz_outer_tail"]);
    }

    #[test]
    fn test_noreturn_annotation_stripped() {
        let header = "void fz_throw(fz_context *ctx, int errcode, const char *fmt, ...) FZ_NORETURN;\n";
        assert_eq!(strip_noreturn(header).matches("FZ_NORETURN").count(), 0);
        assert_eq!(extract_from_text(header, &none()), vec!["fz_throw"]);
    }

    #[test]
    fn test_multiline_and_pointer_declarations() {
        let header = "\
fz_pixmap *fz_new_pixmap(fz_context *ctx, fz_colorspace *cs,
\tint w, int h, fz_separations *seps, int alpha);
const char *fz_version(void);
unsigned int fz_hash(const char *s);
";
        assert_eq!(
            extract_from_text(header, &none()),
            vec!["fz_new_pixmap", "fz_version", "fz_hash"]
        );
    }

    #[test]
    fn test_non_declarations_ignored() {
        let header = "\
typedef struct fz_point_s fz_point;
struct fz_point_s
{
\tfloat x, y;
};
#define FZ_MAX 10
";
        assert!(extract_from_text(header, &none()).is_empty());
    }

    #[test]
    fn test_crlf_header_matches_lf() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        let path = root.join("crlf.h");
        fs::write(
            &path,
            "#ifndef NDEBUG\r\nint fz_dbg(void);\r\n#endif\r\nint fz_real(void);\r\n",
        )
        .unwrap();

        assert_eq!(extract_exports(&path, &none()).unwrap(), vec!["fz_real"]);
    }

    #[test]
    fn test_directory_sorted_and_recursive() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        fs::create_dir_all(root.join("fitz/nested")).unwrap();
        fs::write(root.join("fitz/b.h"), "int fz_b(void);\n").unwrap();
        fs::write(root.join("fitz/a.h"), "int fz_a(void);\n").unwrap();
        fs::write(root.join("fitz/nested/c.h"), "int fz_c(void);\n").unwrap();
        fs::write(root.join("fitz/z.h"), "#define NOTHING\n").unwrap();

        let first = extract_exports(&root.join("fitz"), &none()).unwrap();
        let second = extract_exports(&root.join("fitz"), &none()).unwrap();

        assert_eq!(first, vec!["fz_a", "fz_b", "fz_c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_declarations_kept() {
        let header = "int fz_same(void);\nint fz_same(void);\n";
        assert_eq!(extract_from_text(header, &none()), vec!["fz_same", "fz_same"]);
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);

        let result = extract_exports(&root.join("absent.h"), &none());
        assert!(matches!(result, Err(Error::Read { .. })));
    }

    #[test]
    fn test_probe_classifies_paths() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);
        fs::write(root.join("x.h"), "").unwrap();

        assert_eq!(
            HeaderSource::probe(&root).unwrap(),
            HeaderSource::Directory(root.clone())
        );
        assert_eq!(
            HeaderSource::probe(&root.join("x.h")).unwrap(),
            HeaderSource::File(root.join("x.h"))
        );
    }
}
