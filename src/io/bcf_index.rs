//! `bcftools index --stats`: contig, length (or "."), record count.

use anyhow::Result;

use super::fields::{columns, number, numbered_lines};
use crate::model::ContigCount;

pub fn parse_stats(text: &str) -> Result<Vec<ContigCount>> {
    numbered_lines(text)
        .map(|(n, line)| -> Result<ContigCount> {
            let c = columns(line, n, 3)?;
            let length = match c[1] {
                "." => None,
                l => Some(number(l, "contig length", n)?),
            };
            Ok(ContigCount {
                contig: c[0].to_string(),
                length,
                records: number(c[2], "record count", n)?,
            })
        })
        .collect()
}
