//! `samtools flagstat` in its default text layout, `-O tsv` and `-O json`.
//!
//! Text lines look like `1234 + 5 mapped (99.1% : N/A)`; the trailing
//! percentage block is kept as part of the category. The tsv layout puts
//! percentages in rows of their own (`97.50%\t50.00%\tmapped %`).

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::sync::OnceLock;

use super::fields::{columns, number, numbered_lines};
use crate::model::{FlagStat, FlagValue};

fn line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+) \+ (\d+) (.+)$").expect("flagstat line regex"))
}

pub fn parse_text(text: &str) -> Result<Vec<FlagStat>> {
    numbered_lines(text)
        .map(|(n, line)| -> Result<FlagStat> {
            let caps = line_re()
                .captures(line.trim_end())
                .ok_or_else(|| anyhow!("line {n}: not a flagstat line: '{line}'"))?;
            Ok(FlagStat {
                passed: FlagValue::Count(number(&caps[1], "QC-passed count", n)?),
                failed: FlagValue::Count(number(&caps[2], "QC-failed count", n)?),
                category: caps[3].to_string(),
            })
        })
        .collect()
}

/// One tsv cell: `123`, `97.50%` or `N/A`.
fn tsv_value(field: &str, name: &str, lineno: usize) -> Result<FlagValue> {
    let field = field.trim();
    if field == "N/A" {
        return Ok(FlagValue::NotAvailable);
    }
    match field.strip_suffix('%') {
        Some(pct) => Ok(FlagValue::Percent(number(pct, name, lineno)?)),
        None => Ok(FlagValue::Count(number(field, name, lineno)?)),
    }
}

/// `-O tsv` layout: passed, failed, category.
pub fn parse_tsv(text: &str) -> Result<Vec<FlagStat>> {
    numbered_lines(text)
        .map(|(n, line)| -> Result<FlagStat> {
            let c = columns(line, n, 3)?;
            Ok(FlagStat {
                passed: tsv_value(c[0], "QC-passed value", n)?,
                failed: tsv_value(c[1], "QC-failed value", n)?,
                category: c[2].to_string(),
            })
        })
        .collect()
}

pub fn parse_json(text: &str) -> Result<serde_json::Value> {
    serde_json::from_str(text).context("flagstat output is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "\
2000 + 4 in total (QC-passed reads + QC-failed reads)
1990 + 4 primary
0 + 0 secondary
1950 + 2 mapped (97.50% : 50.00%)
";

    #[test]
    fn default_text_layout() {
        let v = parse_text(TEXT).unwrap();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0].passed, FlagValue::Count(2000));
        assert_eq!(v[0].failed, FlagValue::Count(4));
        assert_eq!(v[0].category, "in total (QC-passed reads + QC-failed reads)");
        assert_eq!(v[3].category, "mapped (97.50% : 50.00%)");
    }

    // samtools 1.19 `flagstat -O tsv`
    const TSV: &str = "\
2000\t4\ttotal (QC-passed reads + QC-failed reads)
1990\t4\tprimary
0\t0\tsecondary
0\t0\tsupplementary
0\t0\tduplicates
0\t0\tprimary duplicates
1950\t2\tmapped
97.50%\t50.00%\tmapped %
1940\t2\tprimary mapped
N/A\tN/A\tprimary mapped %
0\t0\tpaired in sequencing
";

    #[test]
    fn tsv_layout_with_percentage_rows() {
        let v = parse_tsv(TSV).unwrap();
        assert_eq!(v.len(), 11);
        assert_eq!(v[0].passed, FlagValue::Count(2000));
        assert_eq!(v[6].category, "mapped");
        assert_eq!(v[7].passed, FlagValue::Percent(97.5));
        assert_eq!(v[7].failed, FlagValue::Percent(50.0));
        assert_eq!(v[7].category, "mapped %");
        assert_eq!(v[9].passed, FlagValue::NotAvailable);
        assert_eq!(v[9].category, "primary mapped %");
    }

    #[test]
    fn tsv_bad_cell_rejected() {
        let e = parse_tsv("12\tabc%\tmapped %\n").unwrap_err();
        assert!(e.to_string().starts_with("line 1: invalid QC-failed value 'abc'"));
    }

    #[test]
    fn garbage_line_rejected() {
        let e = parse_text("2000 + 4 in total\nwat\n").unwrap_err();
        assert!(e.to_string().starts_with("line 2: not a flagstat line"));
    }

    #[test]
    fn json_layout() {
        let v = parse_json(r#"{"QC-passed reads": {"total": 2000}}"#).unwrap();
        assert_eq!(v["QC-passed reads"]["total"], 2000);
        assert!(parse_json("2000 + 4 in total").is_err());
    }
}
