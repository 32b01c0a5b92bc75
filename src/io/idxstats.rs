//! `samtools idxstats`: contig, length, mapped, unmapped.

use anyhow::Result;

use super::fields::{columns, number, numbered_lines};
use crate::model::IdxStat;

pub fn parse(text: &str) -> Result<Vec<IdxStat>> {
    numbered_lines(text)
        .map(|(n, line)| -> Result<IdxStat> {
            let c = columns(line, n, 4)?;
            Ok(IdxStat {
                contig: c[0].to_string(),
                length: number(c[1], "length", n)?,
                mapped: number(c[2], "mapped count", n)?,
                unmapped: number(c[3], "unmapped count", n)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_including_unplaced() {
        let txt = "chr1\t248956422\t1200\t3\nchrM\t16569\t88\t0\n*\t0\t0\t17\n";
        let v = parse(txt).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v[1].contig, "chrM");
        assert_eq!(v[1].length, 16569);
        assert_eq!(v[2].contig, "*");
        assert_eq!(v[2].unmapped, 17);
    }

    #[test]
    fn short_row_is_an_error() {
        let e = parse("chr1\t10\t1\t0\nchr2\t5\n").unwrap_err();
        assert!(e.to_string().starts_with("line 2:"));
    }
}
