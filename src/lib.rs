//! Subcommand dispatch for command-line tools.
//!
//! `verbs` lets a binary expose named subcommands in the style of
//! `git <verb>`: the first positional argument picks a command, with
//! unique-prefix and edit-distance fallbacks for typos, the command's
//! flags are parsed, the declared environment variables are resolved,
//! and the command runs and returns the process exit code (0 success,
//! 1 command-reported error, 2 usage error). Aligned help screens come
//! for free via the bundled [`CMD_HELP`] command.
//!
//! An application is a set of static [`Command`] descriptors grouped
//! under an [`Application`]. Each descriptor carries a factory that
//! builds a fresh runnable per invocation, so concurrent dispatches
//! (parallel tests in particular) never share flag state.
//!
//! ```no_run
//! use std::io::Write as _;
//! use std::process;
//!
//! use verbs::{
//!     dispatch, Application, Command, CommandRun, DefaultApplication, Env, CMD_HELP,
//! };
//!
//! static CMD_VERSION: Command = Command::new(
//!     "version",
//!     "prints the tool version",
//!     "Prints the tool version.",
//!     version_factory,
//! );
//!
//! fn version_factory() -> Box<dyn CommandRun> {
//!     Box::new(VersionRun)
//! }
//!
//! struct VersionRun;
//!
//! impl CommandRun for VersionRun {
//!     fn run(&mut self, app: &dyn Application, _args: &[String], _env: &Env) -> i32 {
//!         let mut out = app.out();
//!         let _ = writeln!(out, "1.0.0");
//!         0
//!     }
//! }
//!
//! static APP: DefaultApplication = DefaultApplication {
//!     name: "demo",
//!     title: "Demonstrates subcommand dispatch.",
//!     commands: &[&CMD_VERSION, &CMD_HELP],
//!     env_vars: &[],
//! };
//!
//! fn main() {
//!     env_logger::init();
//!     process::exit(dispatch(&APP, None));
//! }
//! ```

mod application;
mod command;
mod dispatch;
mod env;
mod flags;
mod help;
mod resolver;
pub mod testing;

pub use application::{Application, DefaultApplication};
pub use command::{Command, CommandFactory, CommandRun};
pub use dispatch::dispatch;
pub use env::{Env, EnvValue, EnvVarDef};
pub use flags::{FlagError, FlagSet};
pub use help::{usage, CMD_HELP};
pub use resolver::{find_command, find_nearest_command};
