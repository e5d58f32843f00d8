//! The entry point wiring resolution, parsing, env and execution.

use std::io::Write as _;

use crate::application::Application;
use crate::env::resolve_env;
use crate::flags::FlagError;
use crate::help::{command_usage, unknown_command, usage};
use crate::resolver::find_nearest_command;

enum Triage {
    Args(Vec<String>),
    Exit(i32),
}

/// Triage of the raw process arguments, used when the caller did not
/// pre-slice them. Leading flags belong to the application itself; the
/// first positional token starts the command's argument vector.
fn triage_process_args(app: &dyn Application) -> Triage {
    let mut raw = std::env::args().skip(1);
    while let Some(token) = raw.next() {
        if token == "--help" || token == "-h" {
            let mut err = app.err();
            usage(&mut *err, app, false);
            return Triage::Exit(0);
        }
        if token == "--" {
            break;
        }
        if token.starts_with('-') {
            let mut err = app.err();
            let _ = write!(err, "{}: unknown flag `{token}`\n\n", app.name());
            usage(&mut *err, app, false);
            return Triage::Exit(2);
        }
        let mut args = vec![token];
        args.extend(raw);
        return Triage::Args(args);
    }
    Triage::Args(raw.collect())
}

/// Runs the application, dispatching to the chosen subcommand, and
/// returns the process exit code: 0 success, 1 command-reported error,
/// 2 usage error.
///
/// Pass `None` to read the process arguments; `main` normally routes
/// straight through `process::exit(dispatch(&APP, None))`. Pass a slice
/// to dispatch a pre-sliced argument vector instead, which is what unit
/// tests and nested applications do; calls with their own slice are
/// safe to run concurrently, since every dispatch builds its command
/// instance fresh and only reads the descriptor.
///
/// `help <cmd>` exits 0 while `<cmd> --help` exits 2: the parser
/// reports `--help` as a failed parse after the help screen renders.
/// This asymmetry is long-standing behavior, kept deliberately.
pub fn dispatch(app: &dyn Application, args: Option<&[String]>) -> i32 {
    let owned;
    let args = match args {
        Some(slice) => slice,
        None => match triage_process_args(app) {
            Triage::Args(from_process) => {
                owned = from_process;
                owned.as_slice()
            }
            Triage::Exit(code) => return code,
        },
    };
    log::debug!("dispatching args: {args:?}");

    let Some(token) = args.first() else {
        let mut err = app.err();
        usage(&mut *err, app, false);
        return 2;
    };

    let Some(cmd) = find_nearest_command(app, token) else {
        let mut err = app.err();
        unknown_command(&mut *err, app, token);
        return 2;
    };
    log::debug!("resolved `{token}` to `{}`", cmd.name());

    // Sections never resolve, so every resolved command has a factory.
    let Some(mut run) = cmd.runnable() else {
        let mut err = app.err();
        unknown_command(&mut *err, app, token);
        return 2;
    };

    let rest = args.get(1..).unwrap_or_default();
    let residuals: Vec<String> = if let Some(flags) = run.flags() {
        flags.init(cmd.name());
        match flags.parse(rest) {
            Ok(()) => flags.args().to_vec(),
            Err(FlagError::HelpRequested) => {
                let mut err = app.err();
                command_usage(&mut *err, app, cmd, run.as_mut());
                return 2;
            }
            Err(FlagError::Parse(parse_err)) => {
                let mut err = app.err();
                let _ = write!(err, "{parse_err}");
                return 2;
            }
        }
    } else {
        rest.to_vec()
    };

    let env = resolve_env(app.env_vars());
    run.run(app, &residuals, &env)
}
