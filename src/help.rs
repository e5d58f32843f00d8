//! Help screens and the built-in `help` command.
//!
//! Both screens are assembled in memory, so rendering is infallible and
//! idempotent; sink errors are ignored like any other diagnostic write.

use std::fmt::Write as _;
use std::io;
use std::io::Write as _;

use crate::application::Application;
use crate::command::{Command, CommandRun};
use crate::env::{Env, EnvVarDef};
use crate::flags::FlagSet;
use crate::resolver::find_nearest_command;

/// Renders the top-level help screen: title, usage line, the command
/// table in declared order, the declared environment variables sorted
/// by name, and the closing tips.
///
/// Advanced commands and variables are hidden unless `include_advanced`
/// is set; if any exist while hidden, a tip points at
/// `help --advanced`. Sections always render, as headings interleaved
/// with the commands they label. Column widths are the longest visible
/// name plus a two-space gutter, computed per table.
pub fn usage(out: &mut dyn io::Write, app: &dyn Application, include_advanced: bool) {
    let mut has_advanced = false;

    let mut visible: Vec<&Command> = Vec::new();
    let mut cmd_width = 0;
    for cmd in app.commands() {
        has_advanced = has_advanced || cmd.is_advanced();
        if !cmd.is_advanced() || include_advanced {
            cmd_width = cmd_width.max(cmd.name().len());
            visible.push(cmd);
        }
    }

    let mut evars: Vec<&EnvVarDef> = Vec::new();
    let mut evar_width = 0;
    for def in app.env_vars() {
        has_advanced = has_advanced || def.advanced;
        if !def.advanced || include_advanced {
            evar_width = evar_width.max(def.name.len());
            evars.push(def);
        }
    }
    evars.sort_by_key(|def| def.name);

    let name = app.name();
    let mut text = String::new();
    let _ = write!(
        text,
        "{}\n\nUsage:  {name} [command] [arguments]\n\nCommands:",
        app.title()
    );
    for cmd in &visible {
        if cmd.is_section() {
            // An empty name padded to the column, then the heading on
            // its own tabbed line.
            let _ = write!(text, "\n  {:<cmd_width$}  \n\t{}", "", cmd.short_desc());
        } else {
            let _ = write!(text, "\n  {:<cmd_width$}  {}", cmd.name(), cmd.short_desc());
        }
    }
    text.push_str("\n\n");
    if !evars.is_empty() {
        text.push_str("Environment Variables:");
        for def in &evars {
            let _ = write!(text, "\n  {:<evar_width$}  {}", def.name, def.short_desc);
            if !def.default.is_empty() {
                let _ = write!(text, " (Default: {:?})", def.default);
            }
        }
        text.push_str("\n\n");
    }
    let _ = write!(
        text,
        "\nUse \"{name} help [command]\" for more information about a command."
    );
    if has_advanced && !include_advanced {
        let _ = write!(text, "\nUse \"{name} help --advanced\" to display all commands.");
    }
    text.push_str("\n\n");
    let _ = out.write_all(text.as_bytes());
}

/// Renders the per-command help screen: trimmed long description, the
/// usage line prefixed with the application name, then the flag listing
/// when the runnable has a flag set.
pub(crate) fn command_usage(
    out: &mut dyn io::Write,
    app: &dyn Application,
    cmd: &Command,
    run: &mut dyn CommandRun,
) {
    let mut text = String::new();
    let long = cmd.long_desc().trim();
    if !long.is_empty() {
        let _ = write!(text, "{long}\n\n");
    }
    let _ = writeln!(text, "usage:  {} {}", app.name(), cmd.usage_line());
    if let Some(flags) = run.flags() {
        text.push_str(&flags.listing());
    }
    let _ = out.write_all(text.as_bytes());
}

/// The standard unknown-command diagnostic, shared by the dispatcher
/// and the `help` command.
pub(crate) fn unknown_command(out: &mut dyn io::Write, app: &dyn Application, token: &str) {
    let _ = write!(
        out,
        "{0}: unknown command `{token}`\n\nRun '{0} help' for usage.\n",
        app.name()
    );
}

/// The built-in `help` command. Include it in the application's command
/// list; it is not added automatically but runs like any other command
/// once listed.
pub static CMD_HELP: Command = Command::new(
    "help [<command>|--advanced]",
    "prints help about a command",
    "Prints an overview of every command or information about a specific command.\n\
     Pass --advanced to see help for advanced commands.",
    help_factory,
);

fn help_factory() -> Box<dyn CommandRun> {
    Box::new(HelpRun {
        flags: FlagSet::new().bool_flag("advanced", "show advanced commands"),
    })
}

struct HelpRun {
    flags: FlagSet,
}

impl CommandRun for HelpRun {
    fn flags(&mut self) -> Option<&mut FlagSet> {
        Some(&mut self.flags)
    }

    fn run(&mut self, app: &dyn Application, args: &[String], _env: &Env) -> i32 {
        if args.is_empty() {
            let mut out = app.out();
            usage(&mut *out, app, self.flags.get_bool("advanced"));
            return 0;
        }
        if args.len() != 1 {
            let mut err = app.err();
            let _ = write!(
                err,
                "{0}: Too many arguments given\n\nRun '{0} help' for usage.\n",
                app.name()
            );
            return 2;
        }
        let token = args.first().map(String::as_str).unwrap_or_default();
        match find_nearest_command(app, token) {
            Some(cmd) => {
                // The error sink, matching the shape `<cmd> --help`
                // produces.
                if let Some(mut run) = cmd.runnable() {
                    let mut err = app.err();
                    command_usage(&mut *err, app, cmd, run.as_mut());
                }
                0
            }
            None => {
                let mut err = app.err();
                unknown_command(&mut *err, app, token);
                2
            }
        }
    }
}
