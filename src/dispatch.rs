//! Dispatcher: run one subcommand of a collection and shape its output.
//!
//! A [`Dispatcher`] fronts a single `(collection, subcommand)` pair, e.g.
//! `samtools idxstats`. Each [`call`](Dispatcher::call):
//!   1. runs the subcommand once through the [`Invoker`],
//!   2. optionally splits stdout/stderr into lines,
//!   3. turns a non-zero exit into a [`DispatchError`],
//!   4. remembers stderr (successful calls only),
//!   5. hands stdout to the first parser rule whose options all appear in the
//!      arguments, or returns the text untouched.
//!
//! Parsers always receive the original, unsplit stdout; `split_lines` only
//! shapes text that is returned unparsed and the stored stderr.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{CallError, DispatchError, LaunchError};
use crate::invoker::{Invocation, Invoker};

pub type ParserFn<T> = Box<dyn Fn(&str) -> anyhow::Result<T> + Send + Sync>;

/// Parser selected when all of `options` appear verbatim among the call's args.
pub struct ParserRule<T> {
    options: BTreeSet<String>,
    parser: ParserFn<T>,
}

impl<T> ParserRule<T> {
    pub fn new<I, S, F>(options: I, parser: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            parser: Box::new(parser),
        }
    }

    pub fn options(&self) -> &BTreeSet<String> {
        &self.options
    }

    /// Exact element match; `-c` does not match `-cv` or `--count`.
    /// An empty option set matches every call.
    pub fn matches(&self, args: &[String]) -> bool {
        self.options.iter().all(|opt| args.contains(opt))
    }

    pub fn apply(&self, stdout: &str) -> anyhow::Result<T> {
        (self.parser)(stdout)
    }
}

impl<T> fmt::Debug for ParserRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRule")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Per-call switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    /// Ask the invoker to capture stdout (default true).
    pub catch_stdout: bool,
    /// Skip parser selection (default false).
    pub raw: bool,
    /// Return stdout/stderr as lines instead of text (default false).
    pub split_lines: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            catch_stdout: true,
            raw: false,
            split_lines: false,
        }
    }
}

impl CallOptions {
    pub fn catch_stdout(mut self, yes: bool) -> Self {
        self.catch_stdout = yes;
        self
    }

    pub fn raw(mut self, yes: bool) -> Self {
        self.raw = yes;
        self
    }

    pub fn split_lines(mut self, yes: bool) -> Self {
        self.split_lines = yes;
        self
    }
}

/// Tool output as monolithic text or as lines with terminators stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Text {
    Raw(String),
    Lines(Vec<String>),
}

impl Default for Text {
    fn default() -> Self {
        Text::Raw(String::new())
    }
}

impl Text {
    fn shape(s: String, split: bool) -> Self {
        if split {
            Text::Lines(split_lines(&s))
        } else {
            Text::Raw(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Text::Raw(s) => s.is_empty(),
            Text::Lines(v) => v.is_empty(),
        }
    }

    /// Raw text as-is, lines joined with `\n`.
    pub fn joined(&self) -> String {
        match self {
            Text::Raw(s) => s.clone(),
            Text::Lines(v) => v.join("\n"),
        }
    }
}

/// Split on `\n`, `\r\n` and lone `\r`, dropping the terminators.
/// A trailing terminator does not produce an empty last line.
fn split_lines(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(i) => {
                out.push(rest[..i].to_string());
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
            }
            None => {
                out.push(rest.to_string());
                break;
            }
        }
    }
    out
}

/// Result of a successful call: parsed value or the (possibly split) stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum Output<T> {
    Text(Text),
    Parsed(T),
}

impl<T> Output<T> {
    pub fn parsed(self) -> Option<T> {
        match self {
            Output::Parsed(v) => Some(v),
            Output::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&Text> {
        match self {
            Output::Text(t) => Some(t),
            Output::Parsed(_) => None,
        }
    }
}

/// Front for one subcommand of a collection.
///
/// `call` takes `&mut self` because it overwrites the stored stderr; share an
/// instance across threads behind a `Mutex`, or build one per thread.
pub struct Dispatcher<T> {
    invoker: Arc<dyn Invoker>,
    collection: String,
    subcommand: String,
    rules: Vec<ParserRule<T>>,
    last_stderr: Text,
}

impl<T> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("collection", &self.collection)
            .field("subcommand", &self.subcommand)
            .field("rules", &self.rules)
            .field("last_stderr", &self.last_stderr)
            .finish_non_exhaustive()
    }
}

impl<T> Dispatcher<T> {
    pub fn new(
        invoker: Arc<dyn Invoker>,
        collection: impl Into<String>,
        subcommand: impl Into<String>,
        rules: Vec<ParserRule<T>>,
    ) -> Self {
        Self {
            invoker,
            collection: collection.into(),
            subcommand: subcommand.into(),
            rules,
            last_stderr: Text::default(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    pub fn rules(&self) -> &[ParserRule<T>] {
        &self.rules
    }

    /// Run the subcommand with `args` passed through verbatim.
    pub fn call<S: AsRef<str>>(
        &mut self,
        args: &[S],
        opts: CallOptions,
    ) -> Result<Output<T>, CallError> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let Invocation {
            exit_code,
            stderr,
            stdout,
        } = self
            .invoker
            .invoke(&self.collection, &self.subcommand, &args, opts.catch_stdout)?;

        let split_stderr = opts.split_lines && !stderr.is_empty();
        let stderr = Text::shape(stderr, split_stderr);

        if exit_code != 0 {
            let stdout = Text::shape(stdout, opts.split_lines);
            return Err(DispatchError {
                collection: self.collection.clone(),
                subcommand: self.subcommand.clone(),
                exit_code,
                stdout: stdout.joined(),
                stderr: stderr.joined(),
            }
            .into());
        }

        self.last_stderr = stderr;

        if !opts.raw && !stdout.is_empty() {
            if let Some(rule) = self.rules.iter().find(|r| r.matches(&args)) {
                log::debug!(
                    "{} {}: parsing stdout with rule {:?}",
                    self.collection,
                    self.subcommand,
                    rule.options()
                );
                return rule
                    .apply(&stdout)
                    .map(Output::Parsed)
                    .map_err(CallError::Parse);
            }
        }

        Ok(Output::Text(Text::shape(stdout, opts.split_lines)))
    }

    /// Stderr of the most recent successful call.
    pub fn get_messages(&self) -> &Text {
        &self.last_stderr
    }

    /// Usage text: the subcommand run without arguments, stderr only.
    /// The exit status is ignored since most tools exit non-zero here.
    pub fn usage(&self) -> Result<String, LaunchError> {
        let inv = self
            .invoker
            .invoke(&self.collection, &self.subcommand, &[], false)?;
        Ok(inv.stderr)
    }
}
