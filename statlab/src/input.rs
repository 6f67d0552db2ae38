//! Free-form numeric input parsing.
//!
//! Accepts commas, semicolons, tabs, newlines or spaces as separators and
//! silently skips tokens that do not parse as numbers, so copy-pasted
//! spreadsheet columns and hand-typed lists both work.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no numeric values found in input")]
    NoValues,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Tokenize free-form numeric text into a sample.
pub fn parse_values(text: &str) -> Result<Vec<f64>, InputError> {
    let values: Vec<f64> = text
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
        .collect();

    if values.is_empty() {
        return Err(InputError::NoValues);
    }
    Ok(values)
}

/// Read and tokenize a plain-text file of numeric values.
pub fn read_values(path: &Path) -> Result<Vec<f64>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_values(&content)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_comma_separated() {
        assert_eq!(
            parse_values("10, 12, 11, 14, 13").unwrap(),
            vec![10.0, 12.0, 11.0, 14.0, 13.0]
        );
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(
            parse_values("1;2\t3\n4 5").unwrap(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn test_non_numeric_tokens_skipped() {
        assert_eq!(
            parse_values("height, 1.5, 2.5, n/a, 3.5").unwrap(),
            vec![1.5, 2.5, 3.5]
        );
    }

    #[test]
    fn test_negative_and_scientific() {
        assert_eq!(
            parse_values("-1.5 2e3 0.001").unwrap(),
            vec![-1.5, 2000.0, 0.001]
        );
    }

    #[test]
    fn test_nothing_numeric_is_an_error() {
        assert!(matches!(parse_values("abc def"), Err(InputError::NoValues)));
        assert!(matches!(parse_values(""), Err(InputError::NoValues)));
    }

    #[test]
    fn test_read_values_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"score\n52\n55\n49\n58\n").unwrap();

        let values = read_values(file.path()).unwrap();
        assert_eq!(values, vec![52.0, 55.0, 49.0, 58.0]);
    }

    #[test]
    fn test_read_values_missing_file() {
        assert!(matches!(
            read_values(Path::new("/nonexistent/data.txt")),
            Err(InputError::Io { .. })
        ));
    }
}
