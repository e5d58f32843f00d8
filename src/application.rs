//! Application descriptors: the unit [`crate::dispatch`] operates on.

use std::io;

use crate::command::Command;
use crate::env::EnvVarDef;

/// Describes an application with subcommand support.
///
/// The descriptor is read-only for the duration of a dispatch; the
/// dispatcher borrows it, never mutates it. The sinks are shared,
/// unbuffered handles used by the dispatcher and the running command
/// alike. Tests implement this trait with captured buffers (see
/// [`crate::testing::TestApp`]) so cases can run in parallel.
pub trait Application {
    /// The application name, as invoked on the command line.
    fn name(&self) -> &str;

    /// A one-line title explaining the purpose of the tool.
    fn title(&self) -> &str;

    /// The subcommands, in display order. Interleave
    /// [`Command::section`] entries to group them in the help listing.
    fn commands(&self) -> &[&Command];

    /// The environment variables this application responds to. Only
    /// these are visible to commands through the resolved env map.
    fn env_vars(&self) -> &[EnvVarDef] {
        &[]
    }

    /// The output sink, normally stdout.
    fn out(&self) -> Box<dyn io::Write + '_> {
        Box::new(io::stdout())
    }

    /// The error sink, normally stderr.
    fn err(&self) -> Box<dyn io::Write + '_> {
        Box::new(io::stderr())
    }
}

/// An [`Application`] over static metadata and the process sinks.
///
/// The usual shape is one `static` instance routed to
/// [`crate::dispatch`] from `main`.
#[derive(Debug)]
pub struct DefaultApplication {
    /// The application name.
    pub name: &'static str,
    /// A one-line title explaining the purpose of the tool.
    pub title: &'static str,
    /// The subcommands, in display order.
    pub commands: &'static [&'static Command],
    /// The environment variables the application responds to.
    pub env_vars: &'static [EnvVarDef],
}

impl Application for DefaultApplication {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn commands(&self) -> &[&Command] {
        self.commands
    }

    fn env_vars(&self) -> &[EnvVarDef] {
        self.env_vars
    }
}
