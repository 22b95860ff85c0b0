//!
//! The benchmark output parser error.
//!

///
/// The benchmark output parser error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output is not text.
    #[error("Benchmark output is not valid UTF-8: {0}")]
    NotText(#[source] std::str::Utf8Error),
}
