//! Internal implementation modules.
//!
//! These modules contain the low-level implementation details and are not part
//! of the public API. They are accessible within the crate using `pub(crate)`.

pub(crate) mod patterns;
pub(crate) mod source;
