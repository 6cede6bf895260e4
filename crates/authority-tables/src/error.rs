use thiserror::Error;

/// Errors raised while parsing a fetched table.
#[derive(Debug, Error)]
pub enum TableParseError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document ended inside <{0}>")]
    Unclosed(String),

    #[error("Document has no root element")]
    NoRoot,
}
