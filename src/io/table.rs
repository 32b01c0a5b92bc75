//! Tab-separated tables with a `#`-prefixed header line (`samtools coverage`).

use anyhow::{anyhow, Result};

use super::fields::{columns, numbered_lines};
use crate::model::Table;

pub fn parse(text: &str) -> Result<Table> {
    let mut lines = numbered_lines(text);
    let (lineno, header) = lines
        .next()
        .ok_or_else(|| anyhow!("table output has no header line"))?;
    let header = header
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("line {lineno}: expected '#'-prefixed header, found '{header}'"))?;
    let cols: Vec<String> = header.split('\t').map(str::to_string).collect();

    let rows = lines
        .map(|(n, line)| -> Result<Vec<String>> {
            Ok(columns(line, n, cols.len())?
                .into_iter()
                .map(str::to_string)
                .collect())
        })
        .collect::<Result<Vec<Vec<String>>>>()?;

    Ok(Table {
        columns: cols,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_table() {
        let txt = "#rname\tstartpos\tendpos\tnumreads\nchr1\t1\t1000\t42\nchrM\t1\t16569\t900\n";
        let t = parse(txt).unwrap();
        assert_eq!(t.columns, vec!["rname", "startpos", "endpos", "numreads"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.get(1, "numreads"), Some("900"));
    }

    #[test]
    fn header_required() {
        assert!(parse("chr1\t1\n").is_err());
    }

    #[test]
    fn header_error_reports_its_own_line() {
        let e = parse("\n\nchr1\t1\n").unwrap_err();
        assert_eq!(
            e.to_string(),
            "line 3: expected '#'-prefixed header, found 'chr1\t1'"
        );
    }

    #[test]
    fn ragged_row_rejected() {
        let e = parse("#a\tb\n1\t2\n3\n").unwrap_err();
        assert_eq!(e.to_string(), "line 3: expected 2 columns, found 1");
    }
}
