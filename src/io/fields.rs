//! Shared helpers for tab-separated tool output.

use anyhow::{anyhow, Context, Result};
use std::str::FromStr;

/// Non-empty lines with their 1-based line numbers.
pub fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
}

/// Split on tabs and require exactly `expected` columns.
pub fn columns(line: &str, lineno: usize, expected: usize) -> Result<Vec<&str>> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() != expected {
        return Err(anyhow!(
            "line {lineno}: expected {expected} columns, found {}",
            cols.len()
        ));
    }
    Ok(cols)
}

pub fn number<T>(field: &str, name: &str, lineno: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    field
        .trim()
        .parse::<T>()
        .with_context(|| format!("line {lineno}: invalid {name} '{field}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines_but_keeps_numbering() {
        let v: Vec<_> = numbered_lines("a\n\nb\n").collect();
        assert_eq!(v, vec![(1, "a"), (3, "b")]);
    }

    #[test]
    fn column_count_checked() {
        assert_eq!(columns("a\tb", 1, 2).unwrap(), vec!["a", "b"]);
        let e = columns("a\tb", 7, 3).unwrap_err();
        assert_eq!(e.to_string(), "line 7: expected 3 columns, found 2");
    }

    #[test]
    fn number_errors_name_field() {
        assert_eq!(number::<u64>("42", "length", 1).unwrap(), 42);
        let e = number::<u64>("x", "length", 2).unwrap_err();
        assert!(e.to_string().contains("line 2: invalid length 'x'"));
    }
}
