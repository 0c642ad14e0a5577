use crate::grid::Operation;

/// A user- or storage-supplied string did not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not one of `+ - * /` (or their symbols and names).
    #[error("unknown operation: {0}")]
    Operation(String),

    /// Not one of `easy`, `medium`, `hard`, `mixed`.
    #[error("unknown difficulty: {0}")]
    Difficulty(String),

    /// Not one of `congruent`, `incongruent`, `mixed`.
    #[error("unknown stroop mode: {0}")]
    StroopMode(String),

    /// Not one of `forward`, `backward`.
    #[error("unknown recall direction: {0}")]
    RecallDirection(String),

    /// Not one of `forward`, `left`, `right`, `back`.
    #[error("unknown relative direction: {0}")]
    RelativeDirection(String),

    /// Not one of the registered colours.
    #[error("unknown colour: {0}")]
    Color(String),
}

/// Failure to turn a route into a renderable view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The route names a module id that is not registered.
    #[error("module not found: {id}")]
    ModuleNotFound { id: String },
}

/// A grid attempt that cannot be scored as submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A header lies outside the range the operation draws from.
    #[error("{axis} header {value} is outside {min}..={max} for {operation}")]
    HeaderOutOfRange {
        axis: &'static str,
        value: i64,
        min: i64,
        max: i64,
        operation: Operation,
    },

    /// The answer rows do not match the header counts.
    #[error("answers must be {rows} rows of {cols} cells")]
    Shape { rows: usize, cols: usize },
}

/// A session setting outside what a module can generate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be between {min} and {max}, got {value}")]
pub struct SettingsError {
    pub field: &'static str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}
