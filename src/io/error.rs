//! Error types and context management for solver operations

use crate::spatial::grid::Position;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// A cell's domain became empty before it could be collapsed
    ///
    /// Not recoverable inside the grid instance: the caller decides whether
    /// to abort or reset the whole grid.
    Contradiction {
        /// Cell whose domain is empty
        position: Position,
        /// Solver iteration when this was detected
        iteration: usize,
    },

    /// Tile catalog cannot be used for solving
    InvalidCatalog {
        /// Description of what's wrong with the catalog
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Collapse requested on a cell that is already fixed
    CellAlreadyCollapsed {
        /// The collapsed cell
        position: Position,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl AlgorithmError {
    /// Position of the empty cell if this is a contradiction
    pub const fn contradiction_position(&self) -> Option<Position> {
        match self {
            Self::Contradiction { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contradiction {
                position,
                iteration,
            } => {
                write!(
                    f,
                    "Contradiction at cell {position} on iteration {iteration}: no tile fits its neighbors"
                )
            }
            Self::InvalidCatalog { reason } => {
                write!(f, "Invalid tile catalog: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::CellAlreadyCollapsed { position } => {
                write!(f, "Cell {position} is already collapsed")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current solver iteration
    pub iteration: Option<usize>,
}

/// Enriches error messages with solver state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the iteration context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Cells don't know the solver iteration they fail on
            if let AlgorithmError::Contradiction { iteration, .. } = &mut error {
                if let Some(iter) = context.iteration {
                    *iteration = iter;
                }
            }
            error
        })
    }

    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.with_context(ErrorContext {
            iteration: Some(iteration),
        })
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
