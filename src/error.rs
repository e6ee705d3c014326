use thiserror::Error;

/// Failures raised while turning a spec into a rendered document.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown layout '{name}'")]
    UnknownLayout { name: String },

    /// A spec row could not be understood. `row` is the 1-based input line.
    #[error("row {row}: {reason} (raw: {raw})")]
    MalformedRow {
        row: usize,
        raw: String,
        reason: String,
    },

    #[error("card {card}: {element}: {source}")]
    MissingResource {
        card: usize,
        element: String,
        #[source]
        source: SurfaceError,
    },

    #[error("failed to read spec rows: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("drawing surface failed: {0}")]
    Surface(#[source] SurfaceError),
}

/// Errors reported by a drawing surface implementation.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("image '{reference}' could not be loaded: {detail}")]
    MissingImage { reference: String, detail: String },

    #[error("font '{0}' is not available")]
    MissingFont(String),

    #[error("{0}")]
    Backend(String),
}

impl SurfaceError {
    /// Whether the error names an unresolved image or font.
    pub fn is_missing_resource(&self) -> bool {
        matches!(
            self,
            SurfaceError::MissingImage { .. } | SurfaceError::MissingFont(_)
        )
    }
}

/// Position-tagged failure from the structured-literal reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

impl LiteralError {
    pub(crate) fn new<S: Into<String>>(offset: usize, message: S) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}
