use thiserror::Error;

/// Errors raised while building a proximity graph.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeometryError {
    /// A coordinate was NaN or infinite and cannot be triangulated.
    #[error("non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    /// The triangulation backend refused a point (e.g. magnitude out of range).
    #[error("triangulation failed: {0}")]
    Triangulation(String),
}
