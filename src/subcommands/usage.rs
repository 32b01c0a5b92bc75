//! `htsd usage` — the tool's own help for one subcommand.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use crate::invoker::ProcessInvoker;
use crate::toolkit::Toolkit;

#[derive(Args, Debug)]
pub struct CmdUsage {
    pub collection: String,
    pub subcommand: String,
    #[arg(long, help = "Allow subcommands missing from the built-in catalog")]
    pub unchecked: bool,
}

impl CmdUsage {
    pub fn run(self, invoker: Arc<ProcessInvoker>) -> Result<()> {
        let toolkit = Toolkit::new(invoker);
        let dispatcher = if self.unchecked {
            toolkit.dispatcher_unchecked(&self.collection, &self.subcommand)
        } else {
            toolkit.dispatcher(&self.collection, &self.subcommand)?
        };
        let text = dispatcher.usage()?;
        if text.trim().is_empty() {
            log::warn!(
                "{} {} printed no usage text on stderr",
                self.collection,
                self.subcommand
            );
        }
        print!("{text}");
        Ok(())
    }
}
