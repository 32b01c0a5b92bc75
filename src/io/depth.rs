//! `samtools depth`: chrom, pos, then one depth column per input.

use anyhow::{anyhow, Result};

use super::fields::{number, numbered_lines};
use crate::model::DepthRow;

pub fn parse(text: &str) -> Result<Vec<DepthRow>> {
    numbered_lines(text)
        .filter(|(_, l)| !l.starts_with('#'))
        .map(|(n, line)| -> Result<DepthRow> {
            let mut it = line.split('\t');
            let contig = it.next().unwrap_or_default();
            let pos = it
                .next()
                .ok_or_else(|| anyhow!("line {n}: missing position"))?;
            let depths = it
                .map(|d| number::<u32>(d, "depth", n))
                .collect::<Result<Vec<_>>>()?;
            if depths.is_empty() {
                return Err(anyhow!("line {n}: missing depth"));
            }
            Ok(DepthRow {
                contig: contig.to_string(),
                pos: number(pos, "position", n)?,
                depths,
            })
        })
        .collect()
}
