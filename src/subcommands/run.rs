//! `htsd run` — one dispatched call.

use anyhow::Result;
use clap::Args;
use fs_err as fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::dispatch::{CallOptions, Output, Text};
use crate::invoker::ProcessInvoker;
use crate::toolkit::Toolkit;

#[derive(Args, Debug)]
pub struct CmdRun {
    /// Backing tool, e.g. samtools or bcftools
    pub collection: String,
    /// Subcommand, e.g. idxstats
    pub subcommand: String,
    /// Arguments passed through verbatim (put them after `--`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    #[arg(long, help = "Skip parsers and print stdout as-is")]
    pub raw: bool,
    #[arg(long, help = "Return stdout/stderr as lines")]
    pub split_lines: bool,
    #[arg(long, help = "Do not capture the tool's stdout")]
    pub no_stdout: bool,
    #[arg(long, help = "Allow subcommands missing from the built-in catalog")]
    pub unchecked: bool,
    #[arg(long, value_name = "PATH", help = "Write the result as JSON to PATH")]
    pub json_out: Option<PathBuf>,
}

impl CmdRun {
    pub fn run(self, invoker: Arc<ProcessInvoker>) -> Result<()> {
        let toolkit = Toolkit::new(invoker);
        let mut dispatcher = if self.unchecked {
            toolkit.dispatcher_unchecked(&self.collection, &self.subcommand)
        } else {
            toolkit.dispatcher(&self.collection, &self.subcommand)?
        };
        let opts = CallOptions::default()
            .raw(self.raw)
            .split_lines(self.split_lines)
            .catch_stdout(!self.no_stdout);

        log::info!("{} {} {:?}", self.collection, self.subcommand, self.args);
        let out = dispatcher.call(&self.args, opts).map_err(|e| {
            if let Some(code) = e.exit_code() {
                log::warn!("{} {} exited with {code}", self.collection, self.subcommand);
            }
            e
        })?;

        for line in dispatcher.get_messages().joined().lines() {
            log::info!("{}: {line}", self.collection);
        }

        if let Some(path) = &self.json_out {
            let f = fs::File::create(path)?;
            match &out {
                Output::Parsed(p) => serde_json::to_writer_pretty(f, p)?,
                Output::Text(t) => serde_json::to_writer_pretty(f, t)?,
            }
            log::info!("wrote {}", path.display());
            return Ok(());
        }

        let stdout = std::io::stdout();
        let mut w = stdout.lock();
        match out {
            Output::Parsed(p) => writeln!(w, "{}", serde_json::to_string_pretty(&p)?)?,
            Output::Text(Text::Raw(s)) => write!(w, "{s}")?,
            Output::Text(Text::Lines(lines)) => {
                for l in lines {
                    writeln!(w, "{l}")?;
                }
            }
        }
        Ok(())
    }
}
