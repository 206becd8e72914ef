use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuggestionError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Serious error, unable to validate package: {message}")]
    Parse { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Archive read error: {0}")]
    ArchiveRead(String),
    #[error("Malformed type descriptor for {name}: {message}")]
    Descriptor { name: String, message: String },
    #[error("{0}")]
    Introspection(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuggestionError {
    /// Fatal errors abort a build; everything else ends up as a message in the error sink.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::ArchiveRead(_))
    }
}

pub type Result<T> = std::result::Result<T, SuggestionError>;

// Helper conversions
impl From<config::ConfigError> for SuggestionError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<pest::error::Error<crate::header::Rule>> for SuggestionError {
    fn from(e: pest::error::Error<crate::header::Rule>) -> Self {
        let (line, col) = match e.line_col {
            pest::error::LineColLocation::Pos((l, c)) => (l, c),
            pest::error::LineColLocation::Span((l, c), _) => (l, c),
        };
        Self::Parse { message: e.variant.message().into_owned(), line: Some(line), col: Some(col) }
    }
}

// ------------- ErrorSink -------------
/// Recoverable problems met during one build, in arrival order. Never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ErrorSink {
    messages: Vec<String>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "recoverable problem");
        self.messages.push(message);
    }
    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }
    pub fn errors(&self) -> &[String] {
        &self.messages
    }
    pub fn len(&self) -> usize {
        self.messages.len()
    }
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}
