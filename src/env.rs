//! Declared environment variables and their per-dispatch resolution.

use std::collections::HashMap;

/// Declares one environment variable an application cares about.
///
/// Declared variables show up in the help screen and are resolved into the
/// [`Env`] map handed to every command. Variables that are not declared are
/// invisible through that map.
#[derive(Debug, Clone)]
pub struct EnvVarDef {
    /// Variable name, also the key in the resolved map.
    pub name: &'static str,
    /// One-line description for the help screen.
    pub short_desc: &'static str,
    /// Value handed to commands when the variable is absent.
    pub default: &'static str,
    /// Hidden from the help listing unless advanced items are requested.
    pub advanced: bool,
}

/// A resolved variable as seen by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvValue {
    /// The environment value, or the declared default when absent.
    pub value: String,
    /// True iff the variable was present, even with an empty value. An
    /// empty present variable keeps its empty value rather than falling
    /// back to the default, which is what makes boolean-ish toggles
    /// expressible.
    pub present: bool,
}

/// Resolved variables keyed by name, built fresh for each dispatch.
pub type Env = HashMap<String, EnvValue>;

/// Resolves `defs` against the process environment.
pub(crate) fn resolve_env(defs: &[EnvVarDef]) -> Env {
    resolve_env_with(defs, |name| {
        std::env::var_os(name).map(|raw| raw.to_string_lossy().into_owned())
    })
}

fn resolve_env_with<F>(defs: &[EnvVarDef], lookup: F) -> Env
where
    F: Fn(&str) -> Option<String>,
{
    defs.iter()
        .map(|def| {
            let resolved = match lookup(def.name) {
                Some(value) => EnvValue {
                    value,
                    present: true,
                },
                None => EnvValue {
                    value: def.default.to_owned(),
                    present: false,
                },
            };
            (def.name.to_owned(), resolved)
        })
        .collect()
}
