use std::fmt;

/// Error types for plate map operations
///
/// Validation findings are deliberately not represented here: they are data
/// (`Vec<String>`) returned by `PlateMap::validate`, so callers can choose
/// to ignore them and continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateMapError {
    /// A selection move would push at least one well past the plate edge
    SelectionOutOfBounds { well: String },
    /// A transport payload carried the wrong number of wells for its grid
    ShapeMismatch { expected: usize, actual: usize },
    /// Template and destination plate maps have different grid dimensions
    DimensionMismatch {
        source_rows: usize,
        source_cols: usize,
        dest_rows: usize,
        dest_cols: usize,
    },
    /// A dose string could not be read as a molar concentration
    InvalidDose { input: String },
}

impl fmt::Display for PlateMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlateMapError::SelectionOutOfBounds { well } => {
                write!(
                    f,
                    "Moving the selection would take well {well} outside the plate"
                )
            }
            PlateMapError::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Plate map expects {expected} wells but payload contains {actual}"
                )
            }
            PlateMapError::DimensionMismatch {
                source_rows,
                source_cols,
                dest_rows,
                dest_cols,
            } => {
                write!(
                    f,
                    "Template plate map is {source_rows}x{source_cols} but destination is {dest_rows}x{dest_cols}"
                )
            }
            PlateMapError::InvalidDose { input } => {
                write!(f, "Could not read '{input}' as a molar dose")
            }
        }
    }
}

impl std::error::Error for PlateMapError {}

/// Result type alias for plate map operations
pub type PlateResult<T> = Result<T, PlateMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message_names_the_well() {
        let err = PlateMapError::SelectionOutOfBounds {
            well: "H12".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Moving the selection would take well H12 outside the plate"
        );
    }

    #[test]
    fn test_shape_mismatch_message_carries_both_counts() {
        let err = PlateMapError::ShapeMismatch {
            expected: 96,
            actual: 95,
        };
        assert!(err.to_string().contains("96"));
        assert!(err.to_string().contains("95"));
    }
}
