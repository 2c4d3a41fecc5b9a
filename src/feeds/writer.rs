//! Envelope writer shared by all feed kinds.

use std::fmt;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::feeds::FeedError;

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const ENVELOPE_SCHEMA: &str = "amzn-envelope.xsd";
const DOCUMENT_VERSION: &str = "1.01";

/// `MessageType` of an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageType {
    /// Product data (`POST_PRODUCT_DATA`).
    Product,
    /// Inventory quantities.
    Inventory,
    /// Prices.
    Price,
}

impl MessageType {
    /// Element text, also used as the name of the message body element.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Inventory => "Inventory",
            Self::Price => "Price",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thin wrapper over a pretty-printing quick-xml writer.
pub(crate) struct FeedWriter {
    writer: Writer<Vec<u8>>,
}

impl FeedWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    pub(crate) fn start(&mut self, name: &str) -> Result<(), FeedError> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    pub(crate) fn start_with(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), FeedError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<(), FeedError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<name>text</name>`, text escaped.
    pub(crate) fn text_element(&mut self, name: &str, text: &str) -> Result<(), FeedError> {
        self.start(name)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    /// Same as [`text_element`](Self::text_element) with attributes.
    pub(crate) fn text_element_with(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> Result<(), FeedError> {
        self.start_with(name, attributes)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> Result<String, FeedError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

/// Writes a one-message envelope and returns the document.
///
/// `body` writes the contents of the `<{message_type}>` element inside
/// `Message`.
pub(crate) fn write_envelope<F>(
    merchant_id: &str,
    message_type: MessageType,
    purge_and_replace: Option<bool>,
    body: F,
) -> Result<String, FeedError>
where
    F: FnOnce(&mut FeedWriter) -> Result<(), FeedError>,
{
    let mut w = FeedWriter::new();
    w.writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    w.start_with(
        "AmazonEnvelope",
        &[
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:noNamespaceSchemaLocation", ENVELOPE_SCHEMA),
        ],
    )?;

    w.start("Header")?;
    w.text_element("DocumentVersion", DOCUMENT_VERSION)?;
    w.text_element("MerchantIdentifier", merchant_id)?;
    w.end("Header")?;

    w.text_element("MessageType", message_type.as_str())?;
    if let Some(purge) = purge_and_replace {
        w.text_element("PurgeAndReplace", if purge { "true" } else { "false" })?;
    }

    w.start("Message")?;
    w.text_element("MessageID", "1")?;
    w.text_element("OperationType", "Update")?;
    w.start(message_type.as_str())?;
    body(&mut w)?;
    w.end(message_type.as_str())?;
    w.end("Message")?;

    w.end("AmazonEnvelope")?;
    w.finish()
}
