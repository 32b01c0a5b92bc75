//! `htsd list` — catalog of collections and subcommands.

use anyhow::Result;
use clap::Args;
use itertools::Itertools;

use crate::error::CatalogError;
use crate::toolkit::{self, COLLECTIONS};

#[derive(Args, Debug)]
pub struct CmdList {
    /// Only this collection
    pub collection: Option<String>,
}

impl CmdList {
    pub fn run(self) -> Result<()> {
        let selected: Vec<_> = match &self.collection {
            Some(name) => vec![toolkit::collection(name).ok_or_else(|| {
                CatalogError::UnknownCollection {
                    name: name.clone(),
                    known: COLLECTIONS.iter().map(|c| c.name).join(", "),
                }
            })?],
            None => COLLECTIONS.iter().collect(),
        };

        for c in selected {
            println!("{}", c.name);
            for sub in c.subcommands {
                let rules = toolkit::builtin_rules(c.name, sub);
                if rules.is_empty() {
                    println!("  {sub}");
                } else {
                    let triggers = rules
                        .iter()
                        .map(|r| {
                            if r.options().is_empty() {
                                "(default)".to_string()
                            } else {
                                r.options().iter().join(" ")
                            }
                        })
                        .join(" | ");
                    println!("  {sub}\tparsed: {triggers}");
                }
            }
        }
        Ok(())
    }
}
