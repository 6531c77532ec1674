/// Output format of a [`SerializedPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    RdfXml,
    IndexJson,
}

impl PayloadFormat {
    /// File extension used by filesystem-backed sinks.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::RdfXml => "xml",
            Self::IndexJson => "json",
        }
    }
}

/// Format-tagged bundle handed to a repository port.
///
/// `backend` identifies the destination inside the back end: the dataset
/// base URI for RDF payloads, the index name for search documents.
/// `context` carries the partition tag of combined cross-dataset payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedPayload {
    pub backend: String,
    pub format: PayloadFormat,
    pub body: String,
    pub context: Option<String>,
}
