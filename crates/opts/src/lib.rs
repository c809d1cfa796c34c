//! A declarative command line option parser.
//!
//! A program describes its command line as a tree of [Command]s, each with a set of
//! [options](Opt) and nested sub-commands. Evaluating the arguments against that tree
//! decodes every option into a typed [Value] and collects the arguments that were
//! neither options nor commands.
//!
//! The supported syntax is
//! * short options like `-f value`, which may be clustered: `-qf value` is the same as `-q -f value`
//! * long options like `--file value` or `--file=value`, which may be abbreviated as long as
//!   the abbreviation is unambiguous (`--fi value`)
//! * sub-commands, which may also be abbreviated. Everything following a sub-command belongs to it.
//! * `--`, after which every argument is positional
//!
//! ```
//! # use opts::{Command, Opt, Parser, Value};
//! let parser = Parser::new(
//!     Command::builder("cat")
//!         .option("filename", Opt::string().short('f').long("file"))
//!         .option("verbose", Opt::boolean().short('q').long("quiet").default(true))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let evaluation = parser.evaluate(["-qf", "/home/foobar", "rest"]).unwrap();
//!
//! assert_eq!(evaluation.get("verbose"), Some(&Value::Bool(false)));
//! assert_eq!(evaluation.get("filename"), Some(&Value::from("/home/foobar")));
//! assert_eq!(evaluation.leftovers(), ["rest"]);
//! ```

mod command;
mod decimal;
mod error;
mod evaluator;
mod help;
pub mod matcher;
mod option;
mod parser;
pub mod token;
mod value;

pub use command::{Command, CommandBuilder};
pub use decimal::{Decimal, DecimalError};
pub use error::{DefinitionError, EvaluationError, ValueError};
pub use evaluator::Evaluation;
pub use help::{CommandSummary, OptionSummary};
pub use option::{Kind, Opt, Scalar};
pub use parser::Parser;
pub use value::Value;
