/// Errors that can occur while writing a collection descriptor.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML writing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid collection: {0}")]
    InvalidCollection(String),
}

impl WriteError {
    pub fn invalid_collection(msg: impl Into<String>) -> Self {
        Self::InvalidCollection(msg.into())
    }
}
