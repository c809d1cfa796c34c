use std::{env, ffi::OsString};

use crate::{Command, Evaluation, EvaluationError};

/// The root [Command] of a program.
///
/// A parser never writes to stdout or stderr and never exits the process, what to do
/// with an [EvaluationError] is up to the application. It holds no state between
/// evaluations and can be reused freely.
#[derive(Clone, Debug)]
pub struct Parser {
    root: Command,
}

impl Parser {
    #[must_use]
    pub fn new(root: Command) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Command {
        &self.root
    }

    /// Evaluates the given arguments, which should not include the program name.
    pub fn evaluate<I>(&self, arguments: I) -> Result<Evaluation, EvaluationError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.root.evaluate(arguments).inspect_err(|error| {
            log::debug!("Failed to evaluate arguments for {:?}: {error}", self.root.name());
        })
    }

    /// Like [Parser::evaluate], but for arguments that may not be valid unicode
    pub fn evaluate_os<I>(&self, arguments: I) -> Result<Evaluation, EvaluationError>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let arguments = arguments
            .into_iter()
            .map(|argument| {
                argument
                    .into()
                    .into_string()
                    .map_err(|argument| EvaluationError::NotUnicode { argument })
            })
            .collect::<Result<Vec<String>, EvaluationError>>()?;

        self.evaluate(arguments)
    }

    /// Evaluates the arguments the current process was started with
    pub fn evaluate_env(&self) -> Result<Evaluation, EvaluationError> {
        self.evaluate_os(env::args_os().skip(1))
    }
}

impl From<Command> for Parser {
    fn from(root: Command) -> Self {
        Self::new(root)
    }
}
