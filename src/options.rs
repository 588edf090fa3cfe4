use serde::{Deserialize, Serialize};

use crate::error::{CheckersError, CheckersResult};

pub const MIN_DIMENSION: usize = 4;
const DEFAULT_DIMENSION: usize = 8;

/// Board configuration supplied when a new game is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    pub name: String,
    pub width: usize,
    pub height: usize,
}

impl BoardOptions {
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Checks the dimension rules: both sides at least 4 and even.
    pub fn validate(&self) -> CheckersResult<()> {
        if self.name.trim().is_empty() {
            return Err(CheckersError::invalid_configuration("name must not be empty"));
        }
        validate_dimensions(self.width, self.height)
    }
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self::new("Standard 8x8", DEFAULT_DIMENSION, DEFAULT_DIMENSION)
    }
}

pub(crate) fn validate_dimensions(width: usize, height: usize) -> CheckersResult<()> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(CheckersError::invalid_configuration(format!(
            "board {width}x{height} is too small: expected at least {MIN_DIMENSION}x{MIN_DIMENSION}"
        )));
    }
    if width % 2 != 0 {
        return Err(CheckersError::invalid_configuration(format!(
            "width {width} is not an even number"
        )));
    }
    if height % 2 != 0 {
        return Err(CheckersError::invalid_configuration(format!(
            "height {height} is not an even number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_board() {
        let options = BoardOptions::default();
        assert_eq!((options.width, options.height), (8, 8));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_small_odd_or_unnamed_boards() {
        for (name, width, height) in [("a", 2, 8), ("b", 8, 3), ("c", 7, 8), ("d", 8, 9), ("", 8, 8)] {
            let err = BoardOptions::new(name, width, height).validate().unwrap_err();
            assert!(matches!(err, CheckersError::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn accepts_rectangular_boards() {
        assert!(BoardOptions::new("wide", 10, 6).validate().is_ok());
        assert!(BoardOptions::new("tiny", 4, 4).validate().is_ok());
    }

    #[test]
    fn missing_json_fields_fall_back_to_defaults() {
        let options: BoardOptions = serde_json::from_str(r#"{"width": 10}"#).unwrap();
        assert_eq!(options.width, 10);
        assert_eq!(options.height, 8);
        assert_eq!(options.name, "Standard 8x8");
    }
}
