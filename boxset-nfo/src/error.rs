/// Errors that can occur while reading NFO files or walking a library.
#[derive(Debug, thiserror::Error)]
pub enum NfoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid NFO: {0}")]
    InvalidNfo(String),
}

impl NfoError {
    pub fn invalid_nfo(msg: impl Into<String>) -> Self {
        Self::InvalidNfo(msg.into())
    }
}
