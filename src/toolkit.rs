//! Known collections, their subcommands, and the parser rules attached to them.

use std::sync::Arc;

use itertools::Itertools;

use crate::dispatch::{Dispatcher, ParserRule};
use crate::error::CatalogError;
use crate::invoker::Invoker;
use crate::io::{bcf_index, depth, flagstat, idxstats, table};
use crate::model::Parsed;

pub const SAMTOOLS: &str = "samtools";
pub const BCFTOOLS: &str = "bcftools";

/// A backing tool and the subcommands it is known to provide.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    pub name: &'static str,
    pub subcommands: &'static [&'static str],
}

impl Collection {
    pub fn has(&self, subcommand: &str) -> bool {
        self.subcommands.contains(&subcommand)
    }
}

pub const COLLECTIONS: &[Collection] = &[
    Collection {
        name: SAMTOOLS,
        subcommands: &[
            "addreplacerg", "ampliconclip", "ampliconstats", "bam2fq", "bedcov", "calmd",
            "cat", "collate", "consensus", "coverage", "depad", "depth", "dict", "faidx",
            "fasta", "fastq", "fixmate", "flags", "flagstat", "fqidx", "head", "idxstats",
            "import", "index", "markdup", "merge", "mpileup", "phase", "quickcheck",
            "reference", "reheader", "reset", "samples", "sort", "split", "stats", "targetcut",
            "view",
        ],
    },
    Collection {
        name: BCFTOOLS,
        subcommands: &[
            "annotate", "call", "cnv", "concat", "consensus", "convert", "csq", "filter",
            "gtcheck", "head", "index", "isec", "merge", "mpileup", "norm", "plugin", "query",
            "reheader", "roh", "sort", "stats", "view",
        ],
    },
];

pub fn collection(name: &str) -> Option<&'static Collection> {
    COLLECTIONS.iter().find(|c| c.name == name)
}

/// Parser rules for `(collection, subcommand)`, in evaluation order.
/// Anything without an entry here is returned as text.
pub fn builtin_rules(collection: &str, subcommand: &str) -> Vec<ParserRule<Parsed>> {
    match (collection, subcommand) {
        (SAMTOOLS, "idxstats") => vec![ParserRule::new(no_options(), |s: &str| {
            idxstats::parse(s).map(Parsed::IdxStats)
        })],
        (SAMTOOLS, "depth") => vec![ParserRule::new(no_options(), |s: &str| {
            depth::parse(s).map(Parsed::Depth)
        })],
        (SAMTOOLS, "flagstat") => vec![
            ParserRule::new(["-O", "json"], flagstat_json),
            ParserRule::new(["--output-fmt", "json"], flagstat_json),
            ParserRule::new(["--output-fmt=json"], flagstat_json),
            ParserRule::new(["-Ojson"], flagstat_json),
            ParserRule::new(["-O", "tsv"], flagstat_tsv),
            ParserRule::new(["--output-fmt", "tsv"], flagstat_tsv),
            ParserRule::new(["--output-fmt=tsv"], flagstat_tsv),
            ParserRule::new(["-Otsv"], flagstat_tsv),
            ParserRule::new(no_options(), |s: &str| {
                flagstat::parse_text(s).map(Parsed::FlagStat)
            }),
        ],
        // -m/--histogram print an ASCII plot instead of the table
        (SAMTOOLS, "coverage") => vec![
            ParserRule::new(["-m"], unparsed),
            ParserRule::new(["--histogram"], unparsed),
            ParserRule::new(no_options(), |s: &str| table::parse(s).map(Parsed::Table)),
        ],
        (BCFTOOLS, "index") => vec![
            ParserRule::new(["-s"], |s: &str| {
                bcf_index::parse_stats(s).map(Parsed::ContigCounts)
            }),
            ParserRule::new(["--stats"], |s: &str| {
                bcf_index::parse_stats(s).map(Parsed::ContigCounts)
            }),
        ],
        _ => Vec::new(),
    }
}

fn no_options() -> [&'static str; 0] {
    []
}

fn flagstat_json(s: &str) -> anyhow::Result<Parsed> {
    flagstat::parse_json(s).map(Parsed::Json)
}

fn flagstat_tsv(s: &str) -> anyhow::Result<Parsed> {
    flagstat::parse_tsv(s).map(Parsed::FlagStat)
}

fn unparsed(s: &str) -> anyhow::Result<Parsed> {
    Ok(Parsed::Text(s.to_string()))
}

/// Builds dispatchers that share one invoker.
#[derive(Clone)]
pub struct Toolkit {
    invoker: Arc<dyn Invoker>,
}

impl Toolkit {
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self { invoker }
    }

    /// Dispatcher for a known `(collection, subcommand)` with built-in rules.
    pub fn dispatcher(
        &self,
        collection: &str,
        subcommand: &str,
    ) -> Result<Dispatcher<Parsed>, CatalogError> {
        let c = self::collection(collection).ok_or_else(|| CatalogError::UnknownCollection {
            name: collection.to_string(),
            known: COLLECTIONS.iter().map(|c| c.name).join(", "),
        })?;
        if !c.has(subcommand) {
            return Err(CatalogError::UnknownSubcommand {
                collection: collection.to_string(),
                name: subcommand.to_string(),
                known: c.subcommands.iter().join(", "),
            });
        }
        Ok(self.dispatcher_unchecked(collection, subcommand))
    }

    /// Same as [`dispatcher`](Self::dispatcher) without consulting the catalog;
    /// for tools or subcommands newer than the built-in lists.
    pub fn dispatcher_unchecked(&self, collection: &str, subcommand: &str) -> Dispatcher<Parsed> {
        Dispatcher::new(
            self.invoker.clone(),
            collection,
            subcommand,
            builtin_rules(collection, subcommand),
        )
    }
}
