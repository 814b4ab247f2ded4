//! Generate module-definition (`.def`) export manifests by scraping C headers.
//!
//! This library provides high-level APIs for:
//! - Extracting declared function names from headers and header directories
//! - Collecting prefixed function names from sources to build exclusion sets
//! - Assembling a manifest from scanned groups and hand-maintained symbol lists
//! - Writing the manifest with CRLF line endings
//!
//! # Example: Extract exports from header text
//!
//! ```
//! use defgen::{extract_from_text, ExclusionSet};
//!
//! let header = "int fz_foo(int a);\nint fz_bar(void);\n";
//! let exclusions: ExclusionSet = ["fz_bar"].into_iter().collect();
//! assert_eq!(extract_from_text(header, &exclusions), vec!["fz_foo"]);
//! ```
//!
//! # Example: Generate the libmupdf manifest
//!
//! ```no_run
//! use defgen::{Assembler, ExportLayout};
//!
//! let layout = ExportLayout::libmupdf();
//! let assembler = Assembler::new("/path/to/project");
//! let manifest = assembler.assemble(&layout)?;
//! manifest.write_to_file(&assembler.resolve(&layout.output))?;
//! # Ok::<(), defgen::Error>(())
//! ```

mod internal;

pub mod assembler;
pub mod collect;
pub mod config;
pub mod error;
pub mod exclusions;
pub mod extract;
pub mod manifest;
pub mod writer;

// Main public API exports
pub use assembler::Assembler;
pub use collect::{collect_functions, collect_functions_from_text};
pub use config::{parse_layout_content, ExportLayout, GroupLayout, SectionLayout, StaticList};
pub use error::Error;
pub use exclusions::ExclusionSet;
pub use extract::{extract_exports, extract_from_text, HeaderSource};
pub use manifest::{Manifest, Section};
pub use writer::{to_crlf, write_manifest};
