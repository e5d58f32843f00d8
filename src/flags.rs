//! Declarative flag sets bridging commands to the clap parser.

use std::collections::HashMap;
use std::fmt::Write as _;

use clap::{Arg, ArgAction, error::ErrorKind};
use thiserror::Error;

/// A failed per-command parse.
#[derive(Debug, Error)]
pub enum FlagError {
    /// `--help` or `-h` was given. The parser reports help as an
    /// unsuccessful parse; the dispatcher renders the command's help
    /// screen and turns this into exit code 2.
    #[error("help requested")]
    HelpRequested,
    /// Any other parse failure, carrying the parser's own diagnostic.
    #[error(transparent)]
    Parse(#[from] clap::Error),
}

#[derive(Debug, Clone, Copy)]
enum FlagKind {
    Bool,
    Str(&'static str),
    Int(i64),
}

#[derive(Debug)]
struct FlagSpec {
    name: &'static str,
    help: &'static str,
    kind: FlagKind,
}

#[derive(Debug, Clone, PartialEq)]
enum FlagValue {
    Bool(bool),
    Str(String),
    Int(i64),
}

impl FlagValue {
    fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    fn as_str(&self) -> Option<&str> {
        if let Self::Str(value) = self {
            Some(value)
        } else {
            None
        }
    }

    fn as_int(&self) -> Option<i64> {
        if let Self::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

/// The flags of one command, declared up front and parsed once per
/// dispatch.
///
/// A `FlagSet` is built inside a command factory with the chainable
/// `*_flag` methods. The dispatcher parses everything after the command
/// name through it; the command then reads the outcome with the typed
/// `get_*` accessors and picks up its positional arguments from
/// [`FlagSet::args`]. Before a parse the accessors return the declared
/// defaults.
///
/// Long flags are spelled `--name`. Flags and positionals may
/// interleave; `--` ends flag parsing. An unknown flag anywhere fails
/// the parse.
#[derive(Debug, Default)]
pub struct FlagSet {
    name: String,
    specs: Vec<FlagSpec>,
    values: HashMap<&'static str, FlagValue>,
    residuals: Vec<String>,
}

impl FlagSet {
    /// An empty flag set. Commands without options still use one (it
    /// accepts positionals and `--help`); returning `None` from
    /// `CommandRun::flags` instead disables parsing altogether.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a boolean flag, off by default.
    pub fn bool_flag(mut self, name: &'static str, help: &'static str) -> Self {
        self.values.insert(name, FlagValue::Bool(false));
        self.specs.push(FlagSpec {
            name,
            help,
            kind: FlagKind::Bool,
        });
        self
    }

    /// Declares a string flag.
    pub fn string_flag(
        mut self,
        name: &'static str,
        default: &'static str,
        help: &'static str,
    ) -> Self {
        self.values.insert(name, FlagValue::Str(default.to_owned()));
        self.specs.push(FlagSpec {
            name,
            help,
            kind: FlagKind::Str(default),
        });
        self
    }

    /// Declares an integer flag. Negative values are accepted
    /// (`--count -2`).
    pub fn int_flag(mut self, name: &'static str, default: i64, help: &'static str) -> Self {
        self.values.insert(name, FlagValue::Int(default));
        self.specs.push(FlagSpec {
            name,
            help,
            kind: FlagKind::Int(default),
        });
        self
    }

    /// Names the parser after the resolved command so diagnostics read
    /// `error: ... Usage: <command> ...`.
    pub(crate) fn init(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    /// Parses the arguments following the command name. On success the
    /// accessors reflect the parsed values and [`FlagSet::args`] holds
    /// the residual positionals.
    pub(crate) fn parse(&mut self, raw: &[String]) -> Result<(), FlagError> {
        let mut parser = clap::Command::new(self.name.clone()).no_binary_name(true);
        for spec in &self.specs {
            let arg = Arg::new(spec.name).long(spec.name).help(spec.help);
            let arg = match spec.kind {
                FlagKind::Bool => arg.action(ArgAction::SetTrue),
                FlagKind::Str(default) => arg
                    .action(ArgAction::Set)
                    .allow_hyphen_values(true)
                    .default_value(default),
                FlagKind::Int(default) => arg
                    .action(ArgAction::Set)
                    .allow_hyphen_values(true)
                    .value_parser(clap::value_parser!(i64))
                    .default_value(default.to_string()),
            };
            parser = parser.arg(arg);
        }
        // Catch-all positional collecting the residual arguments.
        parser = parser.arg(Arg::new("args").num_args(0..));

        let matches = parser.try_get_matches_from(raw).map_err(|err| {
            if err.kind() == ErrorKind::DisplayHelp {
                FlagError::HelpRequested
            } else {
                FlagError::Parse(err)
            }
        })?;

        for spec in &self.specs {
            let value = match spec.kind {
                FlagKind::Bool => FlagValue::Bool(matches.get_flag(spec.name)),
                FlagKind::Str(_) => FlagValue::Str(
                    matches
                        .get_one::<String>(spec.name)
                        .cloned()
                        .unwrap_or_default(),
                ),
                FlagKind::Int(default) => FlagValue::Int(
                    matches
                        .get_one::<i64>(spec.name)
                        .copied()
                        .unwrap_or(default),
                ),
            };
            self.values.insert(spec.name, value);
        }
        self.residuals = matches
            .get_many::<String>("args")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Ok(())
    }

    /// Residual positional arguments of the last parse. Empty before a
    /// parse.
    pub fn args(&self) -> &[String] {
        &self.residuals
    }

    /// The value of a declared boolean flag.
    ///
    /// Asking for an undeclared flag, or for one declared with another
    /// type, is a programmer error and aborts.
    pub fn get_bool(&self, name: &str) -> bool {
        self.values
            .get(name)
            .and_then(FlagValue::as_bool)
            .expect("bool flag not declared on this FlagSet")
    }

    /// The value of a declared string flag. See [`FlagSet::get_bool`]
    /// for the contract.
    pub fn get_string(&self, name: &str) -> String {
        self.values
            .get(name)
            .and_then(FlagValue::as_str)
            .map(ToOwned::to_owned)
            .expect("string flag not declared on this FlagSet")
    }

    /// The value of a declared integer flag. See [`FlagSet::get_bool`]
    /// for the contract.
    pub fn get_int(&self, name: &str) -> i64 {
        self.values
            .get(name)
            .and_then(FlagValue::as_int)
            .expect("int flag not declared on this FlagSet")
    }

    /// The flag listing block of the per-command help screen: one entry
    /// per flag, sorted by name. Empty for a flag set with no flags.
    pub(crate) fn listing(&self) -> String {
        let mut specs: Vec<&FlagSpec> = self.specs.iter().collect();
        specs.sort_by_key(|spec| spec.name);
        let mut out = String::new();
        for spec in specs {
            match spec.kind {
                FlagKind::Bool => {
                    let _ = write!(out, "  --{}\n    \t{}\n", spec.name, spec.help);
                }
                FlagKind::Str(default) => {
                    let _ = write!(out, "  --{} string\n    \t{}", spec.name, spec.help);
                    if !default.is_empty() {
                        let _ = write!(out, " (default {default:?})");
                    }
                    out.push('\n');
                }
                FlagKind::Int(default) => {
                    let _ = write!(out, "  --{} int\n    \t{}", spec.name, spec.help);
                    if default != 0 {
                        let _ = write!(out, " (default {default})");
                    }
                    out.push('\n');
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    fn sample_set() -> FlagSet {
        FlagSet::new()
            .bool_flag("shout", "Greets at full volume.")
            .string_flag("style", "plain", "Rendering style.")
            .int_flag("count", 1, "How many times.")
    }

    #[test]
    fn test_defaults_before_parse() {
        let flags = sample_set();
        assert!(!flags.get_bool("shout"));
        assert_eq!(flags.get_string("style"), "plain");
        assert_eq!(flags.get_int("count"), 1);
        assert!(flags.args().is_empty());
    }

    #[test]
    fn test_parse_flags_and_residuals() {
        let mut flags = sample_set();
        flags.init("greet");
        flags
            .parse(&strings(&["--shout", "Bob", "--count", "3", "Alice"]))
            .expect("parse");
        assert!(flags.get_bool("shout"));
        assert_eq!(flags.get_int("count"), 3);
        assert_eq!(flags.args(), strings(&["Bob", "Alice"]).as_slice());
    }

    #[test]
    fn test_double_dash_ends_flag_parsing() {
        let mut flags = sample_set();
        flags
            .parse(&strings(&["--", "--shout", "x"]))
            .expect("parse");
        assert!(!flags.get_bool("shout"));
        assert_eq!(flags.args(), strings(&["--shout", "x"]).as_slice());
    }

    #[test]
    fn test_int_flag_accepts_negative_value() {
        let mut flags = sample_set();
        flags.parse(&strings(&["--count", "-2"])).expect("parse");
        assert_eq!(flags.get_int("count"), -2);
    }

    #[test]
    fn test_help_is_reported_as_help_requested() {
        let mut flags = sample_set();
        assert!(matches!(
            flags.parse(&strings(&["--help"])),
            Err(FlagError::HelpRequested)
        ));
    }

    #[test]
    fn test_unknown_flag_is_a_parse_error() {
        let mut flags = sample_set();
        let err = flags.parse(&strings(&["--frob"]));
        assert!(matches!(err, Err(FlagError::Parse(_))));
    }

    #[test]
    fn test_unknown_flag_after_positional_still_fails() {
        let mut flags = sample_set();
        assert!(flags.parse(&strings(&["Bob", "--frob"])).is_err());
    }

    #[test]
    fn test_listing_is_sorted_with_types_and_defaults() {
        let flags = sample_set();
        let expected = concat!(
            "  --count int\n    \tHow many times. (default 1)\n",
            "  --shout\n    \tGreets at full volume.\n",
            "  --style string\n    \tRendering style. (default \"plain\")\n",
        );
        assert_eq!(flags.listing(), expected);
    }

    #[test]
    fn test_listing_omits_zero_and_empty_defaults() {
        let flags = FlagSet::new()
            .int_flag("n", 0, "A number.")
            .string_flag("s", "", "A string.");
        assert_eq!(
            flags.listing(),
            "  --n int\n    \tA number.\n  --s string\n    \tA string.\n"
        );
    }

    #[test]
    fn test_empty_flag_set_parses_positionals() {
        let mut flags = FlagSet::new();
        flags.parse(&strings(&["a", "b"])).expect("parse");
        assert_eq!(flags.args(), strings(&["a", "b"]).as_slice());
        assert_eq!(flags.listing(), "");
    }
}
