//! htsd: samtools/bcftools subcommand dispatcher.
//! Entry point only; see `cli` and `subcommands/*`.

use std::process::ExitCode;

use hts_dispatch::cli::Cli;
use hts_dispatch::error::CallError;
use hts_dispatch::util::logging;

fn main() -> ExitCode {
    let cli = <Cli as clap::Parser>::parse();
    logging::init_logging(cli.verbose);
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            // mirror the tool's own exit status when it failed
            let code = err
                .downcast_ref::<CallError>()
                .and_then(CallError::exit_code)
                .and_then(|c| u8::try_from(c).ok())
                .filter(|c| *c != 0)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
