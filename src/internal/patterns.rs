//! Textual patterns used to scrape C headers and sources.
//!
//! None of these understand C. They match the declaration conventions the
//! scanned headers follow and nothing more.

use once_cell::sync::Lazy;
use regex::Regex;

/// Conditional blocks removed from headers before scanning, guard line through
/// the start of the next `#endif` line.
pub(crate) static CONDITIONAL_BLOCKS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?sm)^#ifndef NDEBUG\s.*?^#endif").unwrap(),
        Regex::new(r"(?sm)^#ifdef ARCH_ARM\s.*?^#endif").unwrap(),
        Regex::new(r"(?sm)^#ifdef FITZ_DEBUG_LOCKING\s.*?^#endif").unwrap(),
    ]
});

/// Noreturn annotation directly before the terminator
pub(crate) const NORETURN_ANNOTATION: &str = " FZ_NORETURN;";

/// `ret [qual ]*name(...);` at the start of a line, spanning lines up to the first `);`
pub(crate) static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?sm)^\w+ (?:\w+ )?\*?(\w+)\(.*?\);").unwrap());

/// Function definitions whose names carry one of the library prefixes
pub(crate) static PREFIXED_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?sm)^\w+(?: \*\n|\n| \*| )((?:fz_|pdf_|xps_)\w+)\(").unwrap()
});
