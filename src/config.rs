//! Export layout configuration.
//!
//! An [`ExportLayout`] names the library, where the manifest goes, and the
//! ordered list of sections that make it up. The built-in layout is the one
//! for `libmupdf`; other layouts can be loaded from a small line-based file:
//!
//! ```text
//! # comments and blank lines are ignored
//! library libmupdf
//! output src/libmupdf.def
//!
//! section Fitz exports
//! headers mupdf/include/mupdf/fitz
//! exclude-from mupdf/source/fitz/document.c
//! exclude fz_get_annot_type
//!
//! section lzma exports (required for LzmaSimpleArchive)
//! symbol LzmaDecode
//! symbol x86_Convert
//! ```

use crate::Error;
use bon::Builder;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

pub const DEFAULT_GENERATOR: &str = "defgen";

/// A section produced by scanning headers
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct GroupLayout {
    /// Section comment written as `; <comment>`
    #[builder(into)]
    pub comment: String,
    /// Header file or directory, relative to the project root
    #[builder(into)]
    pub headers: Utf8PathBuf,
    /// Implementation files whose prefixed functions are excluded
    #[builder(default)]
    pub exclude_sources: Vec<Utf8PathBuf>,
    /// Hand-listed excluded symbols
    #[builder(default)]
    pub exclude_symbols: Vec<String>,
}

/// A hand-maintained list of symbols for a library without scanned headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticList {
    pub comment: String,
    pub symbols: Vec<String>,
}

impl StaticList {
    pub fn new(comment: impl Into<String>, symbols: &[&str]) -> Self {
        Self {
            comment: comment.into(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionLayout {
    Scanned(GroupLayout),
    Static(StaticList),
}

impl SectionLayout {
    pub fn comment(&self) -> &str {
        match self {
            Self::Scanned(group) => &group.comment,
            Self::Static(list) => &list.comment,
        }
    }
}

/// Everything needed to assemble one manifest
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ExportLayout {
    /// Name written on the `LIBRARY` line
    #[builder(into)]
    pub library: String,
    /// Tool named in the auto-generated notice
    #[builder(into, default = DEFAULT_GENERATOR.to_string())]
    pub generator: String,
    /// Manifest destination, relative to the project root
    #[builder(into)]
    pub output: Utf8PathBuf,
    #[builder(default)]
    pub sections: Vec<SectionLayout>,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self::libmupdf()
    }
}

fn paths(dir: &str, files: &[&str]) -> Vec<Utf8PathBuf> {
    files
        .iter()
        .map(|file| Utf8Path::new(dir).join(file))
        .collect()
}

fn names(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

impl ExportLayout {
    /// Layout for `libmupdf.dll`: MuPDF, MuXPS and unarr from headers, plus the
    /// djvu, zlib, lzma and libwebp symbols linked into the same library.
    pub fn libmupdf() -> Self {
        let fitz = GroupLayout::builder()
            .comment("Fitz exports")
            .headers("mupdf/include/mupdf/fitz")
            .exclude_sources(paths(
                "mupdf/source/fitz",
                &[
                    // document handlers
                    "document.c",
                    "document-all.c",
                    "document-no-run.c",
                    // additional output formats
                    "svg-device.c",
                    "output-pcl.c",
                    "output-pwg.c",
                    "stream-prog.c",
                    "test-device.c",
                ],
            ))
            .exclude_symbols(names(&["fz_get_annot_type"]))
            .build();

        let mupdf = GroupLayout::builder()
            .comment("MuPDF exports")
            .headers("mupdf/include/mupdf/pdf")
            .exclude_sources(paths(
                "mupdf/source/pdf",
                &[
                    "pdf-form.c",
                    "pdf-event.c",
                    "pdf-appearance.c",
                    "js/pdf-jsimp-cpp.c",
                ],
            ))
            .exclude_symbols(names(&[
                "pdf_access_submit_event",
                "pdf_init_ui_pointer_event",
                // signing
                "pdf_crypt_buffer",
                "pdf_read_pfx",
                "pdf_sign_signature",
                "pdf_signer_designated_name",
                "pdf_free_designated_name",
                "pdf_open_compressed_stream",
            ]))
            .build();

        let muxps = GroupLayout::builder()
            .comment("MuXPS exports")
            .headers("mupdf/include/mupdf/xps.h")
            .exclude_symbols(names(&["xps_parse_solid_color_brush", "xps_print_path"]))
            .build();

        let unarr = GroupLayout::builder()
            .comment("unarr exports (required for ZipUtil, RarUtil)")
            .headers("ext/unarr/unarr.h")
            .build();

        ExportLayout::builder()
            .library("libmupdf")
            .output("src/libmupdf.def")
            .sections(vec![
                SectionLayout::Scanned(fitz),
                SectionLayout::Scanned(mupdf),
                SectionLayout::Scanned(muxps),
                SectionLayout::Scanned(unarr),
                SectionLayout::Static(StaticList::new(
                    "djvu exports (required for DjVuEngine)",
                    DJVU_EXPORTS,
                )),
                SectionLayout::Static(StaticList::new(
                    "zlib exports (required for ZipUtil, PsEngine, PdfCreator, LzmaSimpleArchive)",
                    ZLIB_EXPORTS,
                )),
                SectionLayout::Static(StaticList::new(
                    "lzma exports (required for LzmaSimpleArchive)",
                    LZMA_EXPORTS,
                )),
                SectionLayout::Static(StaticList::new(
                    "libwebp exports (required for WebpReader)",
                    LIBWEBP_EXPORTS,
                )),
            ])
            .build()
    }

    /// Load a layout file
    pub fn from_file(path: &Utf8Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;

        parse_layout_content(&content)
    }
}

pub const DJVU_EXPORTS: &[&str] = &[
    "ddjvu_anno_get_hyperlinks",
    "ddjvu_context_create",
    "ddjvu_context_release",
    "ddjvu_document_create_by_data",
    "ddjvu_document_create_by_filename_utf8",
    "ddjvu_document_get_fileinfo_imp",
    "ddjvu_document_get_filenum",
    "ddjvu_document_get_outline",
    "ddjvu_document_get_pageanno",
    "ddjvu_document_get_pageinfo_imp",
    "ddjvu_document_get_pagenum",
    "ddjvu_document_get_pagetext",
    "ddjvu_document_job",
    "ddjvu_format_create",
    "ddjvu_format_release",
    "ddjvu_format_set_row_order",
    "ddjvu_free",
    "ddjvu_job_release",
    "ddjvu_job_status",
    "ddjvu_message_peek",
    "ddjvu_message_pop",
    "ddjvu_message_wait",
    "ddjvu_miniexp_release",
    "ddjvu_page_create_by_pageno",
    "ddjvu_page_get_type",
    "ddjvu_page_job",
    "ddjvu_page_render",
    "ddjvu_page_set_rotation",
    "ddjvu_stream_close",
    "ddjvu_stream_write",
    "miniexp_caddr",
    "miniexp_cadr",
    "miniexp_cddr",
    "miniexp_stringp",
    "miniexp_symbol",
    "miniexp_to_str",
    "minilisp_finish",
];

pub const ZLIB_EXPORTS: &[&str] = &[
    "crc32",
    "deflate",
    "deflateEnd",
    "deflateInit_",
    "deflateInit2_",
    "gzclose",
    "gzerror",
    "gzopen",
    "gzopen_w",
    "gzprintf",
    "gzread",
    "gzseek",
    "gztell",
    "inflate",
    "inflateEnd",
    "inflateInit_",
    "inflateInit2_",
];

pub const LZMA_EXPORTS: &[&str] = &["LzmaDecode", "x86_Convert"];

pub const LIBWEBP_EXPORTS: &[&str] = &["WebPDecodeBGRAInto", "WebPGetInfo"];

/// Section being filled while parsing a layout file
struct PendingSection {
    comment: String,
    line: usize,
    headers: Option<Utf8PathBuf>,
    exclude_sources: Vec<Utf8PathBuf>,
    exclude_symbols: Vec<String>,
    symbols: Vec<String>,
}

impl PendingSection {
    fn finish(self) -> Result<SectionLayout, Error> {
        match self.headers {
            Some(headers) => {
                if !self.symbols.is_empty() {
                    return Err(Error::Layout(format!(
                        "line {}: section '{}' mixes headers and symbol entries",
                        self.line, self.comment
                    )));
                }
                Ok(SectionLayout::Scanned(GroupLayout {
                    comment: self.comment,
                    headers,
                    exclude_sources: self.exclude_sources,
                    exclude_symbols: self.exclude_symbols,
                }))
            }
            None => {
                if self.symbols.is_empty() {
                    return Err(Error::Layout(format!(
                        "line {}: section '{}' has neither headers nor symbols",
                        self.line, self.comment
                    )));
                }
                if !self.exclude_sources.is_empty() || !self.exclude_symbols.is_empty() {
                    return Err(Error::Layout(format!(
                        "line {}: section '{}' excludes symbols but scans no headers",
                        self.line, self.comment
                    )));
                }
                Ok(SectionLayout::Static(StaticList {
                    comment: self.comment,
                    symbols: self.symbols,
                }))
            }
        }
    }
}

/// Parse the text of a layout file
pub fn parse_layout_content(content: &str) -> Result<ExportLayout, Error> {
    let mut library = None;
    let mut generator = None;
    let mut output = None;
    let mut sections = Vec::new();
    let mut current: Option<PendingSection> = None;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (keyword, value) = match line.split_once(char::is_whitespace) {
            Some((keyword, value)) => (keyword, value.trim()),
            None => (line, ""),
        };

        if value.is_empty() {
            return Err(Error::Layout(format!(
                "line {}: '{}' needs a value",
                line_no, keyword
            )));
        }

        match keyword {
            "library" => library = Some(value.to_string()),
            "generator" => generator = Some(value.to_string()),
            "output" => output = Some(Utf8PathBuf::from(value)),
            "section" => {
                if let Some(section) = current.take() {
                    sections.push(section.finish()?);
                }
                current = Some(PendingSection {
                    comment: value.to_string(),
                    line: line_no,
                    headers: None,
                    exclude_sources: Vec::new(),
                    exclude_symbols: Vec::new(),
                    symbols: Vec::new(),
                });
            }
            "headers" | "exclude-from" | "exclude" | "symbol" => {
                let section = current.as_mut().ok_or_else(|| {
                    Error::Layout(format!(
                        "line {}: '{}' appears before any section",
                        line_no, keyword
                    ))
                })?;
                match keyword {
                    "headers" => {
                        if section.headers.is_some() {
                            return Err(Error::Layout(format!(
                                "line {}: section '{}' already has headers",
                                line_no, section.comment
                            )));
                        }
                        section.headers = Some(Utf8PathBuf::from(value));
                    }
                    "exclude-from" => section.exclude_sources.push(Utf8PathBuf::from(value)),
                    "exclude" => section.exclude_symbols.push(value.to_string()),
                    _ => section.symbols.push(value.to_string()),
                }
            }
            other => {
                return Err(Error::Layout(format!(
                    "line {}: unknown keyword '{}'",
                    line_no, other
                )));
            }
        }
    }

    if let Some(section) = current.take() {
        sections.push(section.finish()?);
    }

    let library =
        library.ok_or_else(|| Error::Layout("missing 'library' directive".to_string()))?;
    let output = output.unwrap_or_else(|| Utf8PathBuf::from(format!("{}.def", library)));

    Ok(ExportLayout {
        library,
        generator: generator.unwrap_or_else(|| DEFAULT_GENERATOR.to_string()),
        output,
        sections,
    })
}
