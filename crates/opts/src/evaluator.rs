//! Walks the command line and decodes it against a [Command].
//!
//! Arguments are processed from left to right:
//! * Flags are resolved against the options of the current command. A flag that takes
//!   a value consumes the argument following it.
//! * The first plain argument that names a sub-command (possibly abbreviated) hands all
//!   remaining arguments to that sub-command, which is evaluated recursively. Sub-commands
//!   only see their own options.
//! * Any other plain argument is left over.
//!
//! The first error aborts the evaluation.

use std::collections::{BTreeMap, BTreeSet};

use crate::{matcher, token::Token, Command, EvaluationError, Opt, Value, ValueError};

/// The decoded command line of a single scope.
///
/// An invoked sub-command is not stored among the options under its name, but
/// separately as a `(name, evaluation)` pair, see [subcommand](Evaluation::subcommand)
/// and [command](Evaluation::command). That way an option key and a command name may
/// coincide. [into_parts](Evaluation::into_parts) takes the three parts apart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    options: BTreeMap<String, Value>,
    leftovers: Vec<String>,
    subcommand: Option<Box<(String, Evaluation)>>,
}

impl Evaluation {
    /// The decoded options, including the defaults of options that were not passed
    #[must_use]
    pub fn options(&self) -> &BTreeMap<String, Value> {
        &self.options
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Arguments that were neither options nor commands, in their original order
    #[must_use]
    pub fn leftovers(&self) -> &[String] {
        &self.leftovers
    }

    /// The sub-command that was invoked, if any
    #[must_use]
    pub fn subcommand(&self) -> Option<(&str, &Evaluation)> {
        self.subcommand
            .as_deref()
            .map(|(name, evaluation)| (name.as_str(), evaluation))
    }

    /// The evaluation of the sub-command `name`, if that was the one invoked
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Evaluation> {
        self.subcommand()
            .filter(|(invoked, _)| *invoked == name)
            .map(|(_, evaluation)| evaluation)
    }

    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<String, Value>,
        Vec<String>,
        Option<(String, Evaluation)>,
    ) {
        (
            self.options,
            self.leftovers,
            self.subcommand.map(|subcommand| *subcommand),
        )
    }
}

/// Evaluation state of a single command
struct Scope<'c> {
    options: BTreeMap<String, Value>,
    leftovers: Vec<String>,

    /// Options that were explicitly passed, as opposed to holding their default
    passed: BTreeSet<&'c str>,
}

impl<'c> Scope<'c> {
    fn new(command: &'c Command) -> Self {
        let options = command
            .options()
            .flat_map(|(key, option)| Some((key.to_string(), option.default_value()?.clone())))
            .collect();

        Self {
            options,
            leftovers: vec![],
            passed: BTreeSet::new(),
        }
    }

    fn record(
        &mut self,
        key: &'c str,
        option: &Opt,
        flag: String,
        raw: Option<&str>,
    ) -> Result<(), EvaluationError> {
        let decoded = option.decode(raw).map_err(|error| match error {
            ValueError::Missing => EvaluationError::MissingValue { flag },
            ValueError::Unexpected => EvaluationError::UnexpectedValue { flag },
            source => EvaluationError::InvalidValue {
                flag,
                value: raw.unwrap_or_default().to_string(),
                source,
            },
        })?;

        // Defaults are replaced, not accumulated
        let previous = if self.passed.insert(key) {
            None
        } else {
            self.options.remove(key)
        };

        self.options
            .insert(key.to_string(), option.accumulate(previous, decoded));
        Ok(())
    }

    fn finish(self, subcommand: Option<(String, Evaluation)>) -> Evaluation {
        Evaluation {
            options: self.options,
            leftovers: self.leftovers,
            subcommand: subcommand.map(Box::new),
        }
    }
}

pub(crate) fn evaluate(command: &Command, arguments: &[String]) -> Result<Evaluation, EvaluationError> {
    let mut scope = Scope::new(command);
    let mut remaining = arguments;

    while let Some((argument, rest)) = remaining.split_first() {
        remaining = rest;

        let token = Token::classify(argument);
        log::trace!("{:?}: {argument:?} is {token:?}", command.name());

        match token {
            Token::Terminator => {
                scope.leftovers.extend_from_slice(remaining);
                break;
            },
            Token::Long { name, value } => {
                let flag = format!("--{name}");
                let Some((key, option)) = command.long_option(name)? else {
                    return Err(EvaluationError::UnknownOption { flag });
                };

                let raw = match value {
                    Some(value) => Some(value),
                    None if option.takes_value() => take_value(&mut remaining),
                    None => None,
                };
                scope.record(key, option, flag, raw)?;
            },
            Token::Short(cluster) => {
                for (short, key, option) in matcher::match_cluster(command, cluster)? {
                    let raw = if option.takes_value() {
                        take_value(&mut remaining)
                    } else {
                        None
                    };
                    scope.record(key, option, format!("-{short}"), raw)?;
                }
            },
            Token::Plain(text) => match command.resolve_command(text)? {
                Some(subcommand) => {
                    log::debug!(
                        "Entering sub-command {:?} of {:?} with {} remaining arguments",
                        subcommand.name(),
                        command.name(),
                        remaining.len()
                    );

                    let nested = evaluate(subcommand, remaining)?;
                    return Ok(scope.finish(Some((subcommand.name().to_string(), nested))));
                },
                None => scope.leftovers.push(argument.clone()),
            },
        }
    }

    Ok(scope.finish(None))
}

/// Consumes the next argument as the value of an option, unless it is a flag itself
fn take_value<'a>(remaining: &mut &'a [String]) -> Option<&'a str> {
    let (next, rest) = remaining.split_first()?;
    if Token::classify(next).is_flag() {
        return None;
    }

    *remaining = rest;
    Some(next)
}
