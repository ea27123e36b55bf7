//! Progress sources: scroll position normalized to `[0, 1]`.

pub mod progress;
