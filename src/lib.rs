pub mod cli;
pub mod dispatch;
pub mod error;
pub mod invoker;
pub mod mock;
pub mod model;
pub mod toolkit;

pub mod io {
    pub mod bcf_index;
    pub mod depth;
    pub mod fields;
    pub mod flagstat;
    pub mod idxstats;
    pub mod table;
}

pub mod util {
    pub mod logging;
    pub mod tools;
}

pub mod subcommands {
    pub mod list;
    pub mod run;
    pub mod syscheck;
    pub mod usage;
}

pub use dispatch::{CallOptions, Dispatcher, Output, ParserRule, Text};
pub use error::{CallError, DispatchError, LaunchError};
pub use invoker::{Invocation, Invoker, ProcessInvoker};
