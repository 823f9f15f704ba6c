//! Naive CSV reader and positional merger.
//!
//! The parser deliberately matches the behavior of the original workflow:
//! split on newlines, split cells on commas, trim, pad short rows with
//! empty strings. There is no quoting or escaping support, so a literal
//! comma inside a field corrupts column alignment. Malformed input never
//! fails to parse; it degrades to blank cells.

use std::collections::BTreeMap;
use std::fmt;

/// An in-memory table parsed from CSV text.
///
/// Every row holds exactly the header set as keys; cells missing from a
/// short line are filled with `""`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Header names in file order. Order matters for display only.
    pub headers: Vec<String>,
    /// Rows as header -> value mappings.
    pub rows: Vec<BTreeMap<String, String>>,
}

impl Dataset {
    /// Parse raw CSV text. Line 0 is the header row; blank and
    /// whitespace-only lines are dropped.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let headers: Vec<String> = match lines.next() {
            Some(line) => line.split(',').map(|h| h.trim().to_string()).collect(),
            None => Vec::new(),
        };

        let rows = lines
            .map(|line| {
                let cells: Vec<&str> = line.split(',').map(|c| c.trim()).collect();
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), cells.get(i).copied().unwrap_or("").to_string()))
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Header names usable as column choices (empty names filtered out).
    pub fn columns(&self) -> Vec<String> {
        self.headers.iter().filter(|h| !h.is_empty()).cloned().collect()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value at `row[column]`, empty string when absent.
    pub fn value(&self, row: usize, column: &str) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Serialize back to CSV text. Round-trips with [`Dataset::parse`]
    /// for inputs without embedded delimiters.
    pub fn to_csv(&self) -> String {
        let mut out = self.headers.join(",");
        for row in &self.rows {
            out.push('\n');
            let line: Vec<&str> = self
                .headers
                .iter()
                .map(|h| row.get(h).map(String::as_str).unwrap_or(""))
                .collect();
            out.push_str(&line.join(","));
        }
        out
    }
}

/// Merge failure: the two files do not pair up row-for-row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowCountMismatch {
    pub source: usize,
    pub target: usize,
}

impl fmt::Display for RowCountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Source and target files must have the same number of rows ({} vs {})",
            self.source, self.target
        )
    }
}

impl std::error::Error for RowCountMismatch {}

/// Build a `source,target` training table by positional zip.
///
/// Row *i* of the result pairs `a.rows[i][col_a]` with `b.rows[i][col_b]`.
/// No key-based join is performed: re-ordering either input silently
/// produces wrong pairings. Unequal row counts fail with no partial result.
pub fn merge(
    a: &Dataset,
    col_a: &str,
    b: &Dataset,
    col_b: &str,
) -> Result<Dataset, RowCountMismatch> {
    if a.row_count() != b.row_count() {
        return Err(RowCountMismatch {
            source: a.row_count(),
            target: b.row_count(),
        });
    }

    let rows = (0..a.row_count())
        .map(|i| {
            let mut row = BTreeMap::new();
            row.insert("source".to_string(), a.value(i, col_a).to_string());
            row.insert("target".to_string(), b.value(i, col_b).to_string());
            row
        })
        .collect();

    Ok(Dataset {
        headers: vec!["source".to_string(), "target".to_string()],
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let ds = Dataset::parse("name,age\nAlice,30\nBob,25");
        assert_eq!(ds.headers, vec!["name", "age"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.value(0, "name"), "Alice");
        assert_eq!(ds.value(1, "age"), "25");
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let ds = Dataset::parse("a,b\n1,2\n\n   \n3,4\n");
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let ds = Dataset::parse("a,b,c\n1,2");
        assert_eq!(ds.value(0, "c"), "");
        // Row mapping still has the full header set
        assert_eq!(ds.rows[0].len(), 3);
    }

    #[test]
    fn test_parse_trims_cells() {
        let ds = Dataset::parse(" a , b \n 1 , 2 ");
        assert_eq!(ds.headers, vec!["a", "b"]);
        assert_eq!(ds.value(0, "a"), "1");
    }

    #[test]
    fn test_parse_empty_text() {
        let ds = Dataset::parse("");
        assert!(ds.headers.is_empty());
        assert_eq!(ds.row_count(), 0);
    }

    #[test]
    fn test_round_trip() {
        let text = "name,code\nAlice,A1\nBob,B2";
        let ds = Dataset::parse(text);
        assert_eq!(ds.to_csv(), text);
        assert_eq!(Dataset::parse(&ds.to_csv()), ds);
    }

    #[test]
    fn test_merge_positional() {
        let a = Dataset::parse("name\nAlice\nBob");
        let b = Dataset::parse("code\nA1\nB2");
        let merged = merge(&a, "name", &b, "code").unwrap();

        assert_eq!(merged.headers, vec!["source", "target"]);
        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.value(0, "source"), "Alice");
        assert_eq!(merged.value(0, "target"), "A1");
        assert_eq!(merged.value(1, "source"), "Bob");
        assert_eq!(merged.value(1, "target"), "B2");
        assert_eq!(merged.to_csv(), "source,target\nAlice,A1\nBob,B2");
    }

    #[test]
    fn test_merge_row_count_mismatch() {
        let a = Dataset::parse("name\nAlice\nBob\nCarol");
        let b = Dataset::parse("code\nA1\nB2");
        let err = merge(&a, "name", &b, "code").unwrap_err();
        assert_eq!(err, RowCountMismatch { source: 3, target: 2 });
        assert!(err.to_string().contains("same number of rows"));
    }

    #[test]
    fn test_merge_missing_column_degrades_to_blank() {
        let a = Dataset::parse("name\nAlice");
        let b = Dataset::parse("code\nA1");
        let merged = merge(&a, "nope", &b, "code").unwrap();
        assert_eq!(merged.value(0, "source"), "");
        assert_eq!(merged.value(0, "target"), "A1");
    }

    #[test]
    fn test_embedded_comma_corrupts_alignment() {
        // Known limitation of the naive parser: the quoted comma splits.
        let ds = Dataset::parse("a,b\n\"x,y\",z");
        assert_eq!(ds.value(0, "a"), "\"x");
        assert_eq!(ds.value(0, "b"), "y\"");
    }
}
