//! `htsd syscheck` — resolved tools & versions.

use anyhow::Result;
use clap::Args;
use fs_err as fs;
use std::path::PathBuf;

use crate::invoker::ProcessInvoker;
use crate::toolkit::COLLECTIONS;

#[derive(Args, Debug)]
pub struct CmdSyscheck {
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl CmdSyscheck {
    pub fn run(self, invoker: &ProcessInvoker) -> Result<()> {
        let mut executables = serde_json::Map::new();
        for c in COLLECTIONS {
            let entry = match invoker.resolve(c.name) {
                Ok(path) => {
                    let version = invoker
                        .version(c.name)
                        .unwrap_or_else(|e| format!("error: {e}"));
                    log::info!("{}: {} ({version})", c.name, path.display());
                    serde_json::json!({ "path": path, "version": version })
                }
                Err(e) => {
                    log::warn!("{e}");
                    serde_json::json!({ "path": null, "error": e.to_string() })
                }
            };
            executables.insert(c.name.to_string(), entry);
        }

        let obj = serde_json::json!({
            "hts_dispatch_version": env!("CARGO_PKG_VERSION"),
            "executables": executables,
        });

        if let Some(path) = self.out {
            serde_json::to_writer_pretty(fs::File::create(path)?, &obj)?;
        } else {
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
        Ok(())
    }
}
