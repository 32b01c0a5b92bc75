use serde::{Deserialize, Serialize};

/// One row of `samtools idxstats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdxStat {
    pub contig: String,
    pub length: u64,
    pub mapped: u64,
    pub unmapped: u64,
}

/// One row of `samtools depth`: a 1-based position and one depth per input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRow {
    pub contig: String,
    pub pos: u64,
    pub depths: Vec<u32>,
}

/// A flagstat cell: a read count, or in `-O tsv` output a percentage / "N/A".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Count(u64),
    Percent(f64),
    NotAvailable,
}

impl FlagValue {
    pub fn count(&self) -> Option<u64> {
        match self {
            FlagValue::Count(n) => Some(*n),
            _ => None,
        }
    }
}

/// One line of `samtools flagstat`: QC-passed value, QC-failed value, category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagStat {
    pub passed: FlagValue,
    pub failed: FlagValue,
    pub category: String,
}

/// Header-driven tab-separated table (e.g. `samtools coverage`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Value of `column` in row `row`, if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// Per-contig record count from `bcftools index --stats`.
/// `length` is `None` when the header carries no contig length (".").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigCount {
    pub contig: String,
    pub length: Option<u64>,
    pub records: u64,
}

/// Everything the built-in parsers produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum Parsed {
    IdxStats(Vec<IdxStat>),
    Depth(Vec<DepthRow>),
    FlagStat(Vec<FlagStat>),
    Table(Table),
    ContigCounts(Vec<ContigCount>),
    Json(serde_json::Value),
    /// Output deliberately left unparsed (e.g. `coverage --histogram`).
    Text(String),
}
