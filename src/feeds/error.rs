//! Feed assembly errors.

use thiserror::Error;

/// Errors raised while serializing a feed document.
///
/// Assembly writes to an in-memory buffer, so these only surface on writer
/// bugs or invalid UTF-8 in input data.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The XML writer failed.
    #[error("XML write failed: {0}")]
    Write(#[from] std::io::Error),

    /// The XML writer rejected an event.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The produced document was not valid UTF-8.
    #[error("Feed is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

// Verify FeedError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FeedError>();
};
