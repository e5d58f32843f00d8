//! Sample application exercising every feature of the library:
//! sections, advanced commands, flag sets, raw argument pass-through,
//! declared environment variables and a nested application.

use std::io::Write as _;
use std::process;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use colored::Colorize;
use verbs::{
    Application, CMD_HELP, Command, CommandRun, DefaultApplication, Env, EnvVarDef, FlagSet,
    dispatch,
};

static SECTION_EVERYDAY: Command = Command::section("Everyday commands.");
static SECTION_SLEEPY: Command = Command::section("Sleepy commands.");

static APP: DefaultApplication = DefaultApplication {
    name: "sample",
    title: "Sample tool to act as a skeleton for subcommands usage.",
    // Shown in this exact order, so group related commands together.
    commands: &[
        &SECTION_EVERYDAY,
        &CMD_GREET,
        &CMD_HELP,
        &CMD_ASK,
        &SECTION_SLEEPY,
        &CMD_SLEEP,
        &CMD_ENV,
    ],
    env_vars: &[
        EnvVarDef {
            name: "GREET_STYLE",
            short_desc: "Controls the type of greeting.",
            default: "Hi",
            advanced: false,
        },
        EnvVarDef {
            name: "VERBOSE_DREAMS",
            short_desc: "If set to \"1\", dreams are printed while sleeping.",
            default: "",
            advanced: true,
        },
    ],
};

fn main() {
    env_logger::init();
    process::exit(dispatch(&APP, None));
}

/// Reduces a command-internal error to exit code 1, reporting it on the
/// application's error sink.
fn report_error(app: &dyn Application, err: &anyhow::Error) -> i32 {
    let mut sink = app.err();
    let _ = writeln!(sink, "{}: {err}", "Error".red().bold());
    1
}

// --- greet ---

static CMD_GREET: Command = Command::new(
    "greet <who>",
    "greets someone",
    "Greets someone. The greeting word is read from the GREET_STYLE environment variable.",
    greet_factory,
);

fn greet_factory() -> Box<dyn CommandRun> {
    Box::new(GreetRun {
        flags: FlagSet::new().bool_flag("shout", "Greets at full volume."),
    })
}

struct GreetRun {
    flags: FlagSet,
}

impl GreetRun {
    fn greet(&self, app: &dyn Application, who: &str, style: &str) -> Result<()> {
        ensure!(!who.trim().is_empty(), "there is nobody to greet");
        let mut line = format!("{style} {who}!");
        if self.flags.get_bool("shout") {
            line = line.to_uppercase();
        }
        let mut out = app.out();
        writeln!(out, "{line}")?;
        Ok(())
    }
}

impl CommandRun for GreetRun {
    fn flags(&mut self) -> Option<&mut FlagSet> {
        Some(&mut self.flags)
    }

    fn run(&mut self, app: &dyn Application, args: &[String], env: &Env) -> i32 {
        let [who] = args else {
            let mut err = app.err();
            let _ = writeln!(err, "{}: Can only greet one person at a time.", app.name());
            return 1;
        };
        let style = env
            .get("GREET_STYLE")
            .map(|var| var.value.clone())
            .unwrap_or_default();
        match self.greet(app, who, &style) {
            Ok(()) => 0,
            Err(err) => report_error(app, &err),
        }
    }
}

// --- ask: a nested application ---

static CMD_ASK: Command = Command::new(
    "ask <subcommand>",
    "asks questions",
    "Asks one of the known subquestions. `ask` is itself an application with subcommands.",
    ask_factory,
);

fn ask_factory() -> Box<dyn CommandRun> {
    // No flag set: the residual arguments go to the inner application
    // untouched, flags included.
    Box::new(AskRun)
}

struct AskRun;

impl CommandRun for AskRun {
    fn run(&mut self, app: &dyn Application, args: &[String], _env: &Env) -> i32 {
        let inner = AskApp {
            name: format!("{} ask", app.name()),
            parent: app,
        };
        dispatch(&inner, Some(args))
    }
}

static ASK_COMMANDS: &[&Command] = &[&CMD_ASK_APPLE, &CMD_ASK_ARBITRARY, &CMD_ASK_BEER, &CMD_HELP];

struct AskApp<'a> {
    name: String,
    parent: &'a dyn Application,
}

impl Application for AskApp<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        "Ask stuff."
    }

    fn commands(&self) -> &[&Command] {
        ASK_COMMANDS
    }

    fn env_vars(&self) -> &[EnvVarDef] {
        self.parent.env_vars()
    }

    fn out(&self) -> Box<dyn std::io::Write + '_> {
        self.parent.out()
    }

    fn err(&self) -> Box<dyn std::io::Write + '_> {
        self.parent.err()
    }
}

static CMD_ASK_APPLE: Command = Command::new(
    "apple <options>",
    "asks for an apple",
    "Asks for an apple.",
    apple_factory,
);

fn apple_factory() -> Box<dyn CommandRun> {
    Box::new(AppleRun {
        flags: FlagSet::new().bool_flag("bare", "Shows only the apple, no commentary."),
    })
}

struct AppleRun {
    flags: FlagSet,
}

impl CommandRun for AppleRun {
    fn flags(&mut self) -> Option<&mut FlagSet> {
        Some(&mut self.flags)
    }

    fn run(&mut self, app: &dyn Application, args: &[String], _env: &Env) -> i32 {
        if !args.is_empty() {
            let mut err = app.err();
            let _ = writeln!(err, "{}: Unknown arguments.", app.name());
            return 1;
        }
        let mut out = app.out();
        let _ = if self.flags.get_bool("bare") {
            writeln!(out, "apple")
        } else {
            writeln!(out, "Here is your apple. An apple a day keeps the doctor away.")
        };
        0
    }
}

static CMD_ASK_ARBITRARY: Command = Command::new(
    "arbitrary <anything>",
    "asks for anything you want",
    "Asks for arbitrary arguments. No flag parsing happens at all.",
    arbitrary_factory,
);

fn arbitrary_factory() -> Box<dyn CommandRun> {
    Box::new(ArbitraryRun)
}

struct ArbitraryRun;

impl CommandRun for ArbitraryRun {
    fn run(&mut self, app: &dyn Application, args: &[String], _env: &Env) -> i32 {
        let Some(last) = args.last() else {
            let mut err = app.err();
            let _ = writeln!(err, "{}: expected a question.", app.name());
            return 1;
        };
        if !last.ends_with('?') {
            let mut err = app.err();
            let _ = writeln!(err, "{}: expected a question ending with `?`.", app.name());
            return 1;
        }
        let mut out = app.out();
        let _ = writeln!(out, "You asked: {}", args.join(" "));
        let _ = writeln!(out, "That's a great question!");
        0
    }
}

static CMD_ASK_BEER: Command = Command::advanced(
    "beer <options>",
    "asks for beer",
    "Asks for beer. Never succeeds.",
    beer_factory,
);

fn beer_factory() -> Box<dyn CommandRun> {
    Box::new(BeerRun)
}

struct BeerRun;

impl BeerRun {
    fn pour(&self) -> Result<()> {
        bail!("it's a BYOB party, bring your own")
    }
}

impl CommandRun for BeerRun {
    fn run(&mut self, app: &dyn Application, args: &[String], _env: &Env) -> i32 {
        if !args.is_empty() {
            let mut err = app.err();
            let _ = writeln!(err, "{}: Unknown arguments.", app.name());
            return 1;
        }
        match self.pour() {
            Ok(()) => 0,
            Err(err) => report_error(app, &err),
        }
    }
}

// --- sleep ---

static CMD_SLEEP: Command = Command::new(
    "sleep <options>",
    "sleeps for some time",
    "Sleeps for some time, as desired.",
    sleep_factory,
);

fn sleep_factory() -> Box<dyn CommandRun> {
    Box::new(SleepRun {
        flags: FlagSet::new().int_flag("duration", 1, "Seconds to sleep for."),
    })
}

struct SleepRun {
    flags: FlagSet,
}

impl SleepRun {
    fn nap(&self, app: &dyn Application, dream: bool) -> Result<()> {
        let seconds = u64::try_from(self.flags.get_int("duration"))
            .ok()
            .filter(|secs| *secs > 0)
            .context("--duration must be a positive number of seconds")?;
        let mut out = app.out();
        writeln!(out, "Sleeping for {seconds}s.")?;
        if dream {
            let chunk = Duration::from_millis(100);
            let mut left = Duration::from_secs(seconds);
            while !left.is_zero() {
                writeln!(out, "dreaming of sheep")?;
                thread::sleep(chunk);
                left = left.saturating_sub(chunk);
            }
        } else {
            thread::sleep(Duration::from_secs(seconds));
        }
        Ok(())
    }
}

impl CommandRun for SleepRun {
    fn flags(&mut self) -> Option<&mut FlagSet> {
        Some(&mut self.flags)
    }

    fn run(&mut self, app: &dyn Application, args: &[String], env: &Env) -> i32 {
        if !args.is_empty() {
            let mut err = app.err();
            let _ = writeln!(err, "{}: Unsupported arguments.", app.name());
            return 1;
        }
        let dream = env.get("VERBOSE_DREAMS").is_some_and(|var| var.value == "1");
        match self.nap(app, dream) {
            Ok(()) => 0,
            Err(err) => report_error(app, &err),
        }
    }
}

// --- env (advanced) ---

static CMD_ENV: Command = Command::advanced(
    "env",
    "prints resolved environment variables",
    "Prints every declared environment variable as the commands see it,\n\
     with a marker telling whether the value came from the environment\n\
     or from the declared default.",
    env_factory,
);

fn env_factory() -> Box<dyn CommandRun> {
    Box::new(EnvRun {
        flags: FlagSet::new().string_flag("only", "", "Print only the named variable."),
    })
}

struct EnvRun {
    flags: FlagSet,
}

impl CommandRun for EnvRun {
    fn flags(&mut self) -> Option<&mut FlagSet> {
        Some(&mut self.flags)
    }

    fn run(&mut self, app: &dyn Application, _args: &[String], env: &Env) -> i32 {
        let only = self.flags.get_string("only");
        let mut names: Vec<&String> = env.keys().collect();
        names.sort();
        let mut out = app.out();
        for name in names {
            if !only.is_empty() && name.as_str() != only {
                continue;
            }
            let Some(var) = env.get(name) else { continue };
            let provenance = if var.present { "present" } else { "default" };
            let _ = writeln!(out, "{name}={} ({provenance})", var.value);
        }
        0
    }
}
