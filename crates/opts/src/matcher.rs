//! Resolution of abbreviated names and short flag clusters

use std::{collections::BTreeMap, ops::Bound};

use crate::{Command, EvaluationError, Opt};

/// The outcome of looking up a possibly abbreviated name
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    Exact(&'a str),

    /// The token is a prefix of exactly one name
    Abbreviation(&'a str),

    /// The token is a prefix of more than one name, in sorted order
    Ambiguous(Vec<String>),

    NoMatch,
}

/// Looks up `token` in `names`, accepting unambiguous prefixes if `allow_abbreviation` is set.
///
/// Exact matches always win, even if the token is also a prefix of other names.
pub fn resolve_prefix<'a, V>(
    names: &'a BTreeMap<String, V>,
    token: &str,
    allow_abbreviation: bool,
) -> Resolution<'a> {
    if let Some((name, _)) = names.get_key_value(token) {
        return Resolution::Exact(name);
    }

    // The empty string is a prefix of everything, but abbreviates nothing
    if !allow_abbreviation || token.is_empty() {
        return Resolution::NoMatch;
    }

    // Names sharing a prefix are adjacent in a sorted map
    let mut candidates: Vec<&'a str> = names
        .range::<str, _>((Bound::Included(token), Bound::Unbounded))
        .map(|(name, _)| name.as_str())
        .take_while(|name| name.starts_with(token))
        .collect();

    match candidates.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::Abbreviation(candidates.remove(0)),
        _ => Resolution::Ambiguous(candidates.into_iter().map(str::to_string).collect()),
    }
}

/// Computes every unambiguous abbreviation of the given names.
///
/// The result maps each abbreviation to the full name. Full names themselves are not included.
#[must_use]
pub fn abbreviations<V>(names: &BTreeMap<String, V>) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();

    for name in names.keys() {
        for (end, _) in name.char_indices().skip(1) {
            let prefix = &name[..end];
            if resolve_prefix(names, prefix, true) == Resolution::Abbreviation(name) {
                result.insert(prefix.to_string(), name.clone());
            }
        }
    }

    result
}

/// Resolves every flag in a cluster like `-qf` (passed without the dash).
///
/// Only the last flag of a cluster may take a value, since there is only one
/// token following the cluster.
pub fn match_cluster<'c>(
    command: &'c Command,
    cluster: &str,
) -> Result<Vec<(char, &'c str, &'c Opt)>, EvaluationError> {
    let mut flags = vec![];

    for (index, short) in cluster.char_indices() {
        let Some((key, option)) = command.short_option(short) else {
            return Err(EvaluationError::UnknownOption {
                flag: format!("-{short}"),
            });
        };

        let is_last = index + short.len_utf8() == cluster.len();
        if option.takes_value() && !is_last {
            return Err(EvaluationError::InvalidClustering {
                cluster: format!("-{cluster}"),
                flag: short,
            });
        }

        flags.push((short, key, option));
    }

    Ok(flags)
}
