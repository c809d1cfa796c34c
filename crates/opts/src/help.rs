//! Introspection used to render help and usage messages.
//!
//! Rendering itself is left to the application, this module only exposes
//! the structure of a [Command] in a convenient form.

use std::collections::BTreeMap;

use crate::{matcher, Command};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandSummary<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionSummary<'a> {
    pub key: &'a str,
    pub short: Option<char>,
    pub long: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl Command {
    /// The sub-commands of this command, sorted by name, with the first line of their description
    #[must_use]
    pub fn list_subcommands(&self) -> Vec<CommandSummary<'_>> {
        self.commands()
            .map(|command| CommandSummary {
                name: command.name(),
                description: command.short_description(),
            })
            .collect()
    }

    /// The options of this command, sorted by key, with the first line of their description
    #[must_use]
    pub fn list_options(&self) -> Vec<OptionSummary<'_>> {
        self.options()
            .map(|(key, option)| OptionSummary {
                key,
                short: option.short_flag(),
                long: option.long_flag(),
                description: option.short_description(),
            })
            .collect()
    }

    #[must_use]
    pub fn short_description(&self) -> Option<&str> {
        self.description()
            .and_then(|description| description.lines().next())
    }

    #[must_use]
    pub fn long_description(&self) -> Option<&str> {
        self.description()
    }

    /// Every unambiguous abbreviation of a sub-command name, mapped to the full name.
    ///
    /// Empty if abbreviated commands are disabled.
    #[must_use]
    pub fn command_abbreviations(&self) -> BTreeMap<String, String> {
        if !self.allows_abbreviated_commands() {
            return BTreeMap::new();
        }

        let names: BTreeMap<String, ()> = self
            .commands()
            .map(|command| (command.name().to_string(), ()))
            .collect();
        matcher::abbreviations(&names)
    }

    /// Every unambiguous abbreviation of a long option, mapped to the full long flag.
    ///
    /// Empty if abbreviated options are disabled.
    #[must_use]
    pub fn option_abbreviations(&self) -> BTreeMap<String, String> {
        if !self.allows_abbreviated_options() {
            return BTreeMap::new();
        }

        let names: BTreeMap<String, ()> = self
            .options()
            .flat_map(|(_, option)| option.long_flag())
            .map(|long| (long.to_string(), ()))
            .collect();
        matcher::abbreviations(&names)
    }
}
