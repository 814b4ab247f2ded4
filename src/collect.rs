//! Prefix function collector.
//!
//! Pulls `fz_`/`pdf_`/`xps_` function names out of implementation files. The
//! result only ever feeds an [`ExclusionSet`](crate::ExclusionSet).

use crate::internal::patterns::PREFIXED_FUNCTION;
use crate::internal::source::read_text;
use crate::Error;
use camino::Utf8Path;

/// Collect prefixed function names defined in a C source file, in order of appearance
pub fn collect_functions(path: &Utf8Path) -> Result<Vec<String>, Error> {
    let content = read_text(path)?;
    Ok(collect_functions_from_text(&content))
}

/// Collect prefixed function names from already loaded source text
pub fn collect_functions_from_text(content: &str) -> Vec<String> {
    PREFIXED_FUNCTION
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}
