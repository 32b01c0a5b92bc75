//! Scripted [`Invoker`] for tests.
//!
//! Responses are queued up front and replayed in order; every invocation is
//! recorded so tests can assert on exactly what was run.
//!
//! ```
//! use std::sync::Arc;
//! use hts_dispatch::dispatch::{CallOptions, Dispatcher, Output, Text};
//! use hts_dispatch::invoker::Invocation;
//! use hts_dispatch::mock::MockInvoker;
//!
//! let mock = MockInvoker::new();
//! mock.push(Invocation::new(0, "", "42\n"));
//! let mut view: Dispatcher<()> = Dispatcher::new(Arc::new(mock.clone()), "samtools", "view", vec![]);
//! let out = view.call(&["-c", "in.bam"], CallOptions::default()).unwrap();
//! assert_eq!(out, Output::Text(Text::Raw("42\n".into())));
//! assert_eq!(mock.calls()[0].args, vec!["-c", "in.bam"]);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::LaunchError;
use crate::invoker::{Invocation, Invoker};

/// One recorded call to [`MockInvoker::invoke`](Invoker::invoke).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub collection: String,
    pub subcommand: String,
    pub args: Vec<String>,
    pub capture_stdout: bool,
}

/// Thread-safe via internal `Arc<Mutex<...>>`; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockInvoker {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    responses: VecDeque<Result<Invocation, LaunchError>>,
    calls: Vec<RecordedCall>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue the next result.
    pub fn push(&self, invocation: Invocation) {
        self.lock().responses.push_back(Ok(invocation));
    }

    /// Queue a launch failure.
    pub fn push_launch_error(&self, err: LaunchError) {
        self.lock().responses.push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }
}

impl Invoker for MockInvoker {
    /// With nothing queued, answers with a silent zero exit.
    fn invoke(
        &self,
        collection: &str,
        subcommand: &str,
        args: &[String],
        capture_stdout: bool,
    ) -> Result<Invocation, LaunchError> {
        let mut inner = self.lock();
        inner.calls.push(RecordedCall {
            collection: collection.to_string(),
            subcommand: subcommand.to_string(),
            args: args.to_vec(),
            capture_stdout,
        });
        let mut result = inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(Invocation::default()));
        if let Ok(inv) = &mut result {
            if !capture_stdout {
                inv.stdout.clear();
            }
        }
        result
    }
}
