//! CLI definition and top-level dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::invoker::ProcessInvoker;
use crate::subcommands::{list::CmdList, run::CmdRun, syscheck::CmdSyscheck, usage::CmdUsage};
use crate::toolkit::{BCFTOOLS, SAMTOOLS};

#[derive(Parser, Debug)]
#[command(
    name = "htsd",
    version,
    about = "Run samtools/bcftools subcommands and parse their output"
)]
pub struct Cli {
    /// Path to samtools (else HTS_DISPATCH_SAMTOOLS, else PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub samtools: Option<PathBuf>,

    /// Path to bcftools (else HTS_DISPATCH_BCFTOOLS, else PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub bcftools: Option<PathBuf>,

    /// Debug logging (each invocation with timing)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a subcommand; parsed output is printed as JSON
    Run(CmdRun),

    /// Print a subcommand's usage text
    Usage(CmdUsage),

    /// List known collections and subcommands
    List(CmdList),

    /// Report resolved tool paths and versions
    Syscheck(CmdSyscheck),
}

impl Cli {
    pub fn invoker(&self) -> Arc<ProcessInvoker> {
        Arc::new(
            ProcessInvoker::new()
                .with_path_opt(SAMTOOLS, self.samtools.as_deref())
                .with_path_opt(BCFTOOLS, self.bcftools.as_deref()),
        )
    }

    pub fn run(self) -> Result<()> {
        let invoker = self.invoker();
        match self.cmd {
            Commands::Run(cmd) => cmd.run(invoker),
            Commands::Usage(cmd) => cmd.run(invoker),
            Commands::List(cmd) => cmd.run(),
            Commands::Syscheck(cmd) => cmd.run(&invoker),
        }
    }
}
