/// The syntactic role of a single command line argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A lone `--`, everything after it is positional
    Terminator,

    /// `--name` or `--name=value`
    Long { name: &'a str, value: Option<&'a str> },

    /// A cluster of short flags like `-qf`, without the leading dash
    Short(&'a str),

    /// Anything else, either a command or a positional argument
    Plain(&'a str),
}

impl<'a> Token<'a> {
    #[must_use]
    pub fn classify(argument: &'a str) -> Self {
        if argument == "--" {
            return Self::Terminator;
        }

        if let Some(long) = argument.strip_prefix("--") {
            let (name, value) = match long.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (long, None),
            };
            return Self::Long { name, value };
        }

        // A lone dash conventionally refers to stdin/stdout and is not a flag
        match argument.strip_prefix('-') {
            Some(cluster) if !cluster.is_empty() => Self::Short(cluster),
            _ => Self::Plain(argument),
        }
    }

    /// Whether the token can not be the value of a preceding option
    #[must_use]
    pub fn is_flag(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }
}
