//! Definitions of single options and how their values are decoded

use crate::{Value, ValueError};

/// The type of a single value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scalar {
    String,
    Int,
    Float,
    Decimal,
}

/// Describes how the value of an option is decoded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// The option takes exactly one value
    Scalar(Scalar),

    /// The option takes no value, passing it inverts its default
    Boolean,

    /// The option may be passed multiple times, all of its values are collected
    Multiple {
        element: Scalar,

        /// Whether a single occurrence may contain a comma-separated list of values
        separated: bool,
    },
}

/// An option, like `-f <file>` or `--verbose`.
///
/// The name under which the decoded value is stored is not part of the option,
/// it is given when the option is added to a [Command](crate::Command).
///
/// # Examples
///
/// ```
/// # use opts::Opt;
/// let file = Opt::string()
///     .short('f')
///     .long("file")
///     .description("The file to read from");
///
/// let verbose = Opt::boolean().short('q').long("quiet").default(true);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Opt {
    short: Option<char>,
    long: Option<String>,
    kind: Kind,
    default: Option<Value>,
    description: Option<String>,
}

impl Opt {
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        let default = match kind {
            Kind::Boolean => Some(Value::Bool(false)),
            _ => None,
        };

        Self {
            short: None,
            long: None,
            kind,
            default,
            description: None,
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new(Kind::Scalar(Scalar::String))
    }

    /// A boolean option, which defaults to `false` unless configured otherwise
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(Kind::Boolean)
    }

    #[must_use]
    pub fn int() -> Self {
        Self::new(Kind::Scalar(Scalar::Int))
    }

    #[must_use]
    pub fn float() -> Self {
        Self::new(Kind::Scalar(Scalar::Float))
    }

    #[must_use]
    pub fn decimal() -> Self {
        Self::new(Kind::Scalar(Scalar::Decimal))
    }

    /// An option that collects a string for every time it is passed
    #[must_use]
    pub fn multiple() -> Self {
        Self::multiple_of(Scalar::String)
    }

    #[must_use]
    pub fn multiple_of(element: Scalar) -> Self {
        Self::new(Kind::Multiple {
            element,
            separated: false,
        })
    }

    #[must_use]
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    #[must_use]
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    #[must_use]
    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Allows a single occurrence of a [multiple](Kind::Multiple) option to pass
    /// a comma-separated list.
    ///
    /// Values containing commas can be quoted:
    /// * `foo,bar,baz` is `["foo", "bar", "baz"]`
    /// * `foo,'bar,baz'` is `["foo", "bar,baz"]`
    /// * `foo,"bar,baz"` is `["foo", "bar,baz"]`
    ///
    /// Has no effect on other kinds of options.
    #[must_use]
    pub fn separated(mut self) -> Self {
        if let Kind::Multiple { separated, .. } = &mut self.kind {
            *separated = true;
        }
        self
    }

    #[must_use]
    pub fn short_flag(&self) -> Option<char> {
        self.short
    }

    #[must_use]
    pub fn long_flag(&self) -> Option<&str> {
        self.long.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The first line of the description
    #[must_use]
    pub fn short_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .and_then(|description| description.lines().next())
    }

    #[must_use]
    pub fn long_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the option consumes the token following it
    #[must_use]
    pub fn takes_value(&self) -> bool {
        !matches!(self.kind, Kind::Boolean)
    }

    /// Decodes the value of a single occurrence of this option.
    ///
    /// `raw` is the token that follows the option, if any. Boolean options
    /// must not be given a token, they evaluate to the inverse of their default.
    pub fn decode(&self, raw: Option<&str>) -> Result<Value, ValueError> {
        match (self.kind, raw) {
            (Kind::Boolean, None) => {
                let default = self.default.as_ref().and_then(Value::as_bool);
                Ok(Value::Bool(!default.unwrap_or_default()))
            },
            (Kind::Boolean, Some(_)) => Err(ValueError::Unexpected),
            (_, None) => Err(ValueError::Missing),
            (Kind::Scalar(scalar), Some(raw)) => scalar.decode(raw),
            (
                Kind::Multiple {
                    element,
                    separated: false,
                },
                Some(raw),
            ) => Ok(Value::List(vec![element.decode(raw)?])),
            (
                Kind::Multiple {
                    element,
                    separated: true,
                },
                Some(raw),
            ) => {
                let values = split_list(raw)
                    .iter()
                    .map(|piece| element.decode(piece))
                    .collect::<Result<Vec<Value>, ValueError>>()?;
                Ok(Value::List(values))
            },
        }
    }

    /// Combines a freshly decoded value with the value of earlier occurrences of the same option.
    ///
    /// `previous` is `None` if this is the first occurrence.
    #[must_use]
    pub fn accumulate(&self, previous: Option<Value>, decoded: Value) -> Value {
        match (self.kind, previous, decoded) {
            (Kind::Multiple { .. }, Some(Value::List(mut values)), Value::List(new_values)) => {
                values.extend(new_values);
                Value::List(values)
            },
            (_, _, decoded) => decoded,
        }
    }

    /// Whether `value` could have been produced by this option
    pub(crate) fn accepts(&self, value: &Value) -> bool {
        match (self.kind, value) {
            (Kind::Boolean, Value::Bool(_)) => true,
            (Kind::Scalar(scalar), value) => scalar.accepts(value),
            (Kind::Multiple { element, .. }, Value::List(values)) => {
                values.iter().all(|value| element.accepts(value))
            },
            _ => false,
        }
    }
}

impl Scalar {
    pub fn decode(&self, raw: &str) -> Result<Value, ValueError> {
        let value = match self {
            Self::String => Value::String(raw.to_string()),
            Self::Int => Value::Int(raw.parse()?),
            Self::Float => Value::Float(raw.parse()?),
            Self::Decimal => Value::Decimal(raw.parse()?),
        };
        Ok(value)
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Int, Value::Int(_))
                | (Self::Float, Value::Float(_))
                | (Self::Decimal, Value::Decimal(_))
        )
    }
}

/// Splits a comma-separated list, honoring single and double quotes
fn split_list(list: &str) -> Vec<String> {
    let mut pieces = vec![];
    let mut buffer = String::new();
    let mut open_quote = None;
    let mut was_quoted = false;

    for c in list.chars() {
        match (open_quote, c) {
            (None, '\'' | '"') => {
                open_quote = Some(c);
                was_quoted = true;
            },
            (Some(quote), c) if c == quote => open_quote = None,
            (None, ',') => {
                pieces.push(std::mem::take(&mut buffer));
                was_quoted = false;
            },
            (_, c) => buffer.push(c),
        }
    }

    if !buffer.is_empty() || was_quoted {
        pieces.push(buffer);
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Decimal;

    #[test]
    fn string_is_verbatim() {
        let value = Opt::string().decode(Some("/home/foobar")).unwrap();
        assert_eq!(value, Value::from("/home/foobar"));
    }

    #[test]
    fn missing_value() {
        assert_eq!(Opt::string().decode(None), Err(ValueError::Missing));
        assert_eq!(Opt::int().decode(None), Err(ValueError::Missing));
        assert_eq!(Opt::multiple().decode(None), Err(ValueError::Missing));
    }

    #[test]
    fn boolean_inverts_default() {
        assert_eq!(Opt::boolean().decode(None), Ok(Value::Bool(true)));
        assert_eq!(
            Opt::boolean().default(true).decode(None),
            Ok(Value::Bool(false))
        );
        assert_eq!(
            Opt::boolean().decode(Some("yes")),
            Err(ValueError::Unexpected)
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(Opt::int().decode(Some("-12")), Ok(Value::Int(-12)));
        assert_eq!(Opt::float().decode(Some("2.5")), Ok(Value::Float(2.5)));
        assert_eq!(
            Opt::decimal().decode(Some("0.10")),
            Ok(Value::Decimal(Decimal::new(1, 1)))
        );

        assert!(matches!(
            Opt::int().decode(Some("twelve")),
            Err(ValueError::Int(_))
        ));
        assert!(matches!(
            Opt::float().decode(Some("")),
            Err(ValueError::Float(_))
        ));
        assert!(matches!(
            Opt::decimal().decode(Some("1,5")),
            Err(ValueError::Decimal(_))
        ));
    }

    #[test]
    fn multiple_accumulates() {
        let option = Opt::multiple();

        let first = option.decode(Some("a")).unwrap();
        let second = option.decode(Some("b,c")).unwrap();
        let combined = option.accumulate(Some(first), second);

        assert_eq!(combined, Value::from(vec!["a", "b,c"]));
    }

    #[test]
    fn scalar_replaces() {
        let option = Opt::string();
        let replaced = option.accumulate(Some(Value::from("a")), Value::from("b"));
        assert_eq!(replaced, Value::from("b"));
    }

    #[test]
    fn separated_lists() {
        let option = Opt::multiple().separated();

        assert_eq!(
            option.decode(Some("foo,bar,baz")),
            Ok(Value::from(vec!["foo", "bar", "baz"]))
        );
        assert_eq!(
            option.decode(Some("foo,'bar,baz'")),
            Ok(Value::from(vec!["foo", "bar,baz"]))
        );
        assert_eq!(
            option.decode(Some("foo,\"bar,baz\"")),
            Ok(Value::from(vec!["foo", "bar,baz"]))
        );
        assert_eq!(
            option.decode(Some("\"it's\",x")),
            Ok(Value::from(vec!["it's", "x"]))
        );
    }

    #[test]
    fn separated_typed_elements() {
        let option = Opt::multiple_of(Scalar::Int).separated();

        assert_eq!(option.decode(Some("1,2,3")), Ok(Value::from(vec![1_i64, 2, 3])));
        assert!(matches!(
            option.decode(Some("1,two")),
            Err(ValueError::Int(_))
        ));
    }

    #[test]
    fn separated_only_applies_to_multiple() {
        assert_eq!(
            Opt::multiple_of(Scalar::Float).separated().kind(),
            Kind::Multiple {
                element: Scalar::Float,
                separated: true,
            }
        );
        assert_eq!(Opt::int().separated().kind(), Kind::Scalar(Scalar::Int));
        assert_eq!(Opt::boolean().separated().kind(), Kind::Boolean);
    }

    #[test]
    fn split_list_edge_cases() {
        assert_eq!(split_list(""), Vec::<String>::new());
        assert_eq!(split_list("a,"), vec!["a"]);
        assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_list("'a',b"), vec!["a", "b"]);
        assert_eq!(split_list("''"), vec![""]);
    }

    #[test]
    fn accepted_defaults() {
        assert!(Opt::string().accepts(&Value::from("x")));
        assert!(!Opt::string().accepts(&Value::from(1_i64)));
        assert!(Opt::multiple().accepts(&Value::from(vec!["a"])));
        assert!(!Opt::multiple().accepts(&Value::from("a")));
        assert!(!Opt::boolean().accepts(&Value::from("true")));
    }
}
