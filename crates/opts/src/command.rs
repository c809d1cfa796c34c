use std::collections::BTreeMap;

use crate::{
    evaluator,
    matcher::{self, Resolution},
    DefinitionError, Evaluation, EvaluationError, Opt,
};

/// A scope of the command line, with its own options and sub-commands.
///
/// Commands are created through a [CommandBuilder], which validates the definition.
///
/// # Examples
///
/// ```
/// # use opts::{Command, Opt};
/// let add = Command::builder("add")
///     .option("dry-run", Opt::boolean().short('n').long("dry-run"))
///     .build()
///     .unwrap();
///
/// let git = Command::builder("git")
///     .command(add)
///     .build()
///     .unwrap();
///
/// let evaluation = git.evaluate(["ad", "-n"]).unwrap();
/// let (name, add) = evaluation.subcommand().unwrap();
///
/// assert_eq!(name, "add");
/// assert_eq!(add.get("dry-run").and_then(|v| v.as_bool()), Some(true));
/// ```
#[derive(Clone, Debug)]
pub struct Command {
    name: String,
    description: Option<String>,
    options: BTreeMap<String, Opt>,
    short_flags: BTreeMap<char, String>,
    long_flags: BTreeMap<String, String>,
    commands: BTreeMap<String, Command>,
    allow_abbreviated_commands: bool,
    allow_abbreviated_options: bool,
}

#[derive(Clone, Debug)]
pub struct CommandBuilder {
    name: String,
    description: Option<String>,
    options: Vec<(String, Opt)>,
    commands: Vec<Command>,
    allow_abbreviated_commands: bool,
    allow_abbreviated_options: bool,
}

impl Command {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            description: None,
            options: vec![],
            commands: vec![],
            allow_abbreviated_commands: true,
            allow_abbreviated_options: true,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Opt> {
        self.options.get(key)
    }

    pub fn options(&self) -> impl Iterator<Item = (&str, &Opt)> {
        self.options
            .iter()
            .map(|(key, option)| (key.as_str(), option))
    }

    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    #[must_use]
    pub fn allows_abbreviated_commands(&self) -> bool {
        self.allow_abbreviated_commands
    }

    #[must_use]
    pub fn allows_abbreviated_options(&self) -> bool {
        self.allow_abbreviated_options
    }

    /// Finds the option that is spelled `-<short>`
    #[must_use]
    pub fn short_option(&self, short: char) -> Option<(&str, &Opt)> {
        let key = self.short_flags.get(&short)?;
        self.options
            .get_key_value(key)
            .map(|(key, option)| (key.as_str(), option))
    }

    /// Finds the option that is spelled `--<long>`, where `long` may be abbreviated.
    pub fn long_option(&self, long: &str) -> Result<Option<(&str, &Opt)>, EvaluationError> {
        let long = match matcher::resolve_prefix(
            &self.long_flags,
            long,
            self.allow_abbreviated_options,
        ) {
            Resolution::Exact(long) | Resolution::Abbreviation(long) => long,
            Resolution::Ambiguous(candidates) => {
                return Err(EvaluationError::AmbiguousOption {
                    flag: format!("--{long}"),
                    candidates,
                })
            },
            Resolution::NoMatch => return Ok(None),
        };

        let key = &self.long_flags[long];
        Ok(self
            .options
            .get_key_value(key)
            .map(|(key, option)| (key.as_str(), option)))
    }

    /// Looks up a flag token like `-f` or `--file` among the options of this command.
    ///
    /// Options of parent commands are never considered. Tokens that are not a
    /// single flag, like clusters or plain words, resolve to `None`.
    pub fn resolve_option(&self, token: &str) -> Result<Option<(&str, &Opt)>, EvaluationError> {
        if let Some(long) = token.strip_prefix("--") {
            return self.long_option(long);
        }

        let Some(short) = token.strip_prefix('-') else {
            return Ok(None);
        };

        let mut chars = short.chars();
        match (chars.next(), chars.next()) {
            (Some(short), None) => Ok(self.short_option(short)),
            _ => Ok(None),
        }
    }

    /// Looks up a sub-command by its name or an unambiguous prefix of it.
    pub fn resolve_command(&self, token: &str) -> Result<Option<&Command>, EvaluationError> {
        match matcher::resolve_prefix(&self.commands, token, self.allow_abbreviated_commands) {
            Resolution::Exact(name) | Resolution::Abbreviation(name) => Ok(self.commands.get(name)),
            Resolution::Ambiguous(candidates) => Err(EvaluationError::AmbiguousCommand {
                token: token.to_string(),
                candidates,
            }),
            Resolution::NoMatch => Ok(None),
        }
    }

    /// Evaluates the arguments (without the program name) against this command.
    pub fn evaluate<I>(&self, arguments: I) -> Result<Evaluation, EvaluationError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let arguments: Vec<String> = arguments.into_iter().map(Into::into).collect();
        evaluator::evaluate(self, &arguments)
    }
}

impl CommandBuilder {
    /// Adds an option whose value will be stored under `key`
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, option: Opt) -> Self {
        self.options.push((key.into(), option));
        self
    }

    #[must_use]
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether sub-commands may be referred to by an unambiguous prefix of their name.
    ///
    /// Enabled by default.
    #[must_use]
    pub fn allow_abbreviated_commands(mut self, allow: bool) -> Self {
        self.allow_abbreviated_commands = allow;
        self
    }

    /// Whether long options may be referred to by an unambiguous prefix of their name.
    ///
    /// Enabled by default.
    #[must_use]
    pub fn allow_abbreviated_options(mut self, allow: bool) -> Self {
        self.allow_abbreviated_options = allow;
        self
    }

    pub fn build(self) -> Result<Command, DefinitionError> {
        if !is_valid_command_name(&self.name) {
            return Err(DefinitionError::InvalidCommandName { name: self.name });
        }

        let mut options = BTreeMap::new();
        let mut short_flags: BTreeMap<char, String> = BTreeMap::new();
        let mut long_flags: BTreeMap<String, String> = BTreeMap::new();

        for (key, option) in self.options {
            if options.contains_key(&key) {
                return Err(DefinitionError::DuplicateOption { key });
            }

            if option.short_flag().is_none() && option.long_flag().is_none() {
                return Err(DefinitionError::Unreachable { key });
            }

            if let Some(default) = option.default_value() {
                if !option.accepts(default) {
                    return Err(DefinitionError::DefaultMismatch { key });
                }
            }

            if let Some(short) = option.short_flag() {
                if short == '-' || short.is_whitespace() {
                    return Err(DefinitionError::InvalidShort { key, short });
                }

                if let Some(first) = short_flags.get(&short) {
                    return Err(DefinitionError::DuplicateShort {
                        short,
                        first: first.clone(),
                        second: key,
                    });
                }
                short_flags.insert(short, key.clone());
            }

            if let Some(long) = option.long_flag() {
                if long.is_empty() || long.starts_with('-') || long.contains('=') {
                    return Err(DefinitionError::InvalidLong {
                        key,
                        long: long.to_string(),
                    });
                }

                if let Some(first) = long_flags.get(long) {
                    return Err(DefinitionError::DuplicateLong {
                        long: long.to_string(),
                        first: first.clone(),
                        second: key,
                    });
                }
                long_flags.insert(long.to_string(), key.clone());
            }

            options.insert(key, option);
        }

        let mut commands = BTreeMap::new();
        for command in self.commands {
            if commands.contains_key(command.name()) {
                return Err(DefinitionError::DuplicateCommand { name: command.name });
            }
            commands.insert(command.name.clone(), command);
        }

        Ok(Command {
            name: self.name,
            description: self.description,
            options,
            short_flags,
            long_flags,
            commands,
            allow_abbreviated_commands: self.allow_abbreviated_commands,
            allow_abbreviated_options: self.allow_abbreviated_options,
        })
    }
}

fn is_valid_command_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_and_stash() -> Command {
        Command::builder("git")
            .option("stack", Opt::string().long("stack"))
            .option("stash", Opt::string().long("stash"))
            .option("verbose", Opt::boolean().short('v').long("verbose"))
            .command(Command::builder("stack").build().unwrap())
            .command(Command::builder("stash").build().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn resolve_short_and_long() {
        let command = stack_and_stash();

        let (key, _) = command.resolve_option("-v").unwrap().unwrap();
        assert_eq!(key, "verbose");

        let (key, _) = command.resolve_option("--verbose").unwrap().unwrap();
        assert_eq!(key, "verbose");

        assert!(command.resolve_option("-x").unwrap().is_none());
        assert!(command.resolve_option("-vv").unwrap().is_none());
        assert!(command.resolve_option("verbose").unwrap().is_none());
    }

    #[test]
    fn resolve_abbreviated_long_option() {
        let command = stack_and_stash();

        let (key, _) = command.resolve_option("--stac").unwrap().unwrap();
        assert_eq!(key, "stack");

        let (key, _) = command.resolve_option("--v").unwrap().unwrap();
        assert_eq!(key, "verbose");

        let error = command.resolve_option("--sta").unwrap_err();
        assert_eq!(
            error,
            EvaluationError::AmbiguousOption {
                flag: "--sta".to_string(),
                candidates: vec!["stack".to_string(), "stash".to_string()],
            }
        );
    }

    #[test]
    fn resolve_command() {
        let command = stack_and_stash();

        assert_eq!(
            command.resolve_command("stash").unwrap().map(Command::name),
            Some("stash")
        );
        assert_eq!(
            command.resolve_command("stac").unwrap().map(Command::name),
            Some("stack")
        );
        assert!(command.resolve_command("foo").unwrap().is_none());
        assert!(matches!(
            command.resolve_command("s"),
            Err(EvaluationError::AmbiguousCommand { .. })
        ));
    }

    #[test]
    fn abbreviations_can_be_disabled() {
        let command = Command::builder("git")
            .option("verbose", Opt::boolean().long("verbose"))
            .command(Command::builder("add").build().unwrap())
            .allow_abbreviated_commands(false)
            .allow_abbreviated_options(false)
            .build()
            .unwrap();

        assert!(command.resolve_command("ad").unwrap().is_none());
        assert!(command.resolve_command("add").unwrap().is_some());
        assert!(command.resolve_option("--verb").unwrap().is_none());
        assert!(command.resolve_option("--verbose").unwrap().is_some());
    }

    #[test]
    fn duplicate_flags_are_rejected() {
        let result = Command::builder("c")
            .option("a", Opt::string().short('x'))
            .option("b", Opt::int().short('x'))
            .build();
        assert_eq!(
            result.unwrap_err(),
            DefinitionError::DuplicateShort {
                short: 'x',
                first: "a".to_string(),
                second: "b".to_string(),
            }
        );

        let result = Command::builder("c")
            .option("a", Opt::string().long("file"))
            .option("b", Opt::string().long("file"))
            .build();
        assert!(matches!(
            result,
            Err(DefinitionError::DuplicateLong { .. })
        ));

        let result = Command::builder("c")
            .option("a", Opt::string().short('a'))
            .option("a", Opt::string().short('b'))
            .build();
        assert!(matches!(
            result,
            Err(DefinitionError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn duplicate_commands_are_rejected() {
        let result = Command::builder("git")
            .command(Command::builder("add").build().unwrap())
            .command(Command::builder("add").build().unwrap())
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::DuplicateCommand {
                name: "add".to_string()
            }
        );
    }

    #[test]
    fn invalid_definitions() {
        assert!(matches!(
            Command::builder("c").option("a", Opt::string()).build(),
            Err(DefinitionError::Unreachable { .. })
        ));
        assert!(matches!(
            Command::builder("c")
                .option("a", Opt::string().short('-'))
                .build(),
            Err(DefinitionError::InvalidShort { .. })
        ));
        assert!(matches!(
            Command::builder("c")
                .option("a", Opt::string().long("a=b"))
                .build(),
            Err(DefinitionError::InvalidLong { .. })
        ));
        assert!(matches!(
            Command::builder("c")
                .option("a", Opt::int().short('a').default("one"))
                .build(),
            Err(DefinitionError::DefaultMismatch { .. })
        ));
        assert!(matches!(
            Command::builder("--c").build(),
            Err(DefinitionError::InvalidCommandName { .. })
        ));
        assert!(matches!(
            Command::builder("").build(),
            Err(DefinitionError::InvalidCommandName { .. })
        ));
    }
}
