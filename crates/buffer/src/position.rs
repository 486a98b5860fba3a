use std::fmt;

/// Row/column location in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-based)
    pub row: usize,
    /// Position in line in chars (0-based)
    pub column: usize,
}

impl Position {
    /// Create position at specified row and column
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Start of the document
    pub const fn origin() -> Self {
        Self { row: 0, column: 0 }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.row.cmp(&other.row) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    /// Parse `ROW:COL`, e.g. `3:12`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected ROW:COL, got '{}'", s))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| format!("Invalid row: '{}'", row))?;
        let column = column
            .trim()
            .parse()
            .map_err(|_| format!("Invalid column: '{}'", column))?;
        Ok(Self { row, column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let p1 = Position::new(0, 5);
        let p2 = Position::new(1, 0);
        let p3 = Position::new(1, 5);

        assert!(p1 < p2);
        assert!(p2 < p3);
        assert!(p1 < p3);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!("3:12".parse::<Position>().unwrap(), Position::new(3, 12));
        assert_eq!(" 0 : 4 ".parse::<Position>().unwrap(), Position::new(0, 4));
        assert!("3".parse::<Position>().is_err());
        assert!("a:1".parse::<Position>().is_err());
        assert!("1:-2".parse::<Position>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(2, 7).to_string(), "2:7");
    }
}
