//! Command descriptors and the runnable instances they produce.

use crate::application::Application;
use crate::env::Env;
use crate::flags::FlagSet;

/// Builds a fresh [`CommandRun`] for one dispatch.
///
/// Stored in every runnable [`Command`] and invoked once per invocation, so
/// concurrent dispatches of the same command never share flag state.
pub type CommandFactory = fn() -> Box<dyn CommandRun>;

/// A subcommand instance prepared for a single invocation.
pub trait CommandRun {
    /// The command's flag set. The dispatcher initializes and parses it
    /// before calling [`CommandRun::run`]. The default returns `None`,
    /// which opts out of flag parsing entirely: the command then receives
    /// every argument after its name untouched, useful for wrapper
    /// commands that forward to something else.
    fn flags(&mut self) -> Option<&mut FlagSet> {
        None
    }

    /// Executes the command and reduces to a process exit code.
    ///
    /// By convention 0 is success and 1 a command-reported error; the
    /// dispatcher passes the code through without interpreting it.
    fn run(&mut self, app: &dyn Application, args: &[String], env: &Env) -> i32;
}

/// Describes one subcommand of an application.
///
/// Descriptors are static data; the per-invocation state lives in the
/// [`CommandRun`] the factory builds. Construct them with [`Command::new`],
/// [`Command::advanced`] or [`Command::section`].
#[derive(Debug)]
pub struct Command {
    usage_line: &'static str,
    short_desc: &'static str,
    long_desc: &'static str,
    advanced: bool,
    section: bool,
    factory: Option<CommandFactory>,
}

impl Command {
    /// A regular command. The first space-delimited word of `usage_line`
    /// is the command name; the remainder is a syntax hint shown in help.
    pub const fn new(
        usage_line: &'static str,
        short_desc: &'static str,
        long_desc: &'static str,
        factory: CommandFactory,
    ) -> Self {
        Self {
            usage_line,
            short_desc,
            long_desc,
            advanced: false,
            section: false,
            factory: Some(factory),
        }
    }

    /// Like [`Command::new`], but hidden from the default help listing.
    /// Advanced commands still resolve and run normally; `help --advanced`
    /// reveals them.
    pub const fn advanced(
        usage_line: &'static str,
        short_desc: &'static str,
        long_desc: &'static str,
        factory: CommandFactory,
    ) -> Self {
        Self {
            usage_line,
            short_desc,
            long_desc,
            advanced: true,
            section: false,
            factory: Some(factory),
        }
    }

    /// A heading interleaved in the help listing to group the commands
    /// that follow it. Sections cannot run and are invisible to command
    /// resolution.
    pub const fn section(label: &'static str) -> Self {
        Self {
            usage_line: "",
            short_desc: label,
            long_desc: "",
            advanced: false,
            section: true,
            factory: None,
        }
    }

    /// The command name: the usage line up to the first space. Empty for
    /// sections.
    pub fn name(&self) -> &str {
        match self.usage_line.split_once(' ') {
            Some((name, _)) => name,
            None => self.usage_line,
        }
    }

    /// The full usage line, name included.
    pub fn usage_line(&self) -> &str {
        self.usage_line
    }

    /// One-line description for the command table. For sections this is
    /// the heading label.
    pub fn short_desc(&self) -> &str {
        self.short_desc
    }

    /// Long description rendered at the top of the per-command help.
    pub fn long_desc(&self) -> &str {
        self.long_desc
    }

    /// Whether the command is hidden from the default help listing.
    pub fn is_advanced(&self) -> bool {
        self.advanced
    }

    /// Whether this descriptor is a heading rather than a command.
    pub fn is_section(&self) -> bool {
        self.section
    }

    /// A fresh runnable for one invocation; `None` for sections.
    pub fn runnable(&self) -> Option<Box<dyn CommandRun>> {
        self.factory.map(|factory| factory())
    }
}
