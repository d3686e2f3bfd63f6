#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("data corrupted: {0}")]
    DataCorrupted(String),
    #[error("byte source failed: {0}")]
    Source(#[from] std::io::Error),
}

impl DecodeError {
    pub fn corrupted(description: impl Into<String>) -> Self {
        let description = description.into();
        tracing::debug!(%description, "decode failed");
        Self::DataCorrupted(description)
    }

    pub(crate) fn short_read(requested: usize, received: usize) -> Self {
        Self::corrupted(format!(
            "not enough bytes available to decode: requested {requested}, received {received}"
        ))
    }

    /// Debug description of a data-corrupted failure.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::DataCorrupted(description) => Some(description),
            Self::Source(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("incompatible string encoding: {0}")]
    IncompatibleStringEncoding(String),
}
