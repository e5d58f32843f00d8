//! End-to-end tests against the sample binary, covering the paths an
//! in-process dispatch cannot reach: the global argument triage and
//! resolution of real process environment variables.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// The sample binary with both declared env vars scrubbed, so the
/// defaults apply unless a test sets them back.
fn sample() -> Command {
    let mut cmd = cargo_bin_cmd!("sample");
    cmd.env_remove("GREET_STYLE").env_remove("VERBOSE_DREAMS");
    cmd
}

mod global_phase {
    use super::*;

    #[test]
    fn no_arguments_prints_usage_to_stderr_and_fails() {
        sample()
            .assert()
            .code(2)
            .stdout("")
            .stderr(predicate::str::contains(
                "Usage:  sample [command] [arguments]",
            ));
    }

    #[test]
    fn help_flag_prints_usage_to_stderr_and_succeeds() {
        sample()
            .arg("--help")
            .assert()
            .success()
            .stdout("")
            .stderr(predicate::str::contains(
                "Sample tool to act as a skeleton for subcommands usage.",
            ));
    }

    #[test]
    fn unknown_leading_flag_fails_with_usage() {
        sample()
            .arg("--frob")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("sample: unknown flag `--frob`"))
            .stderr(predicate::str::contains(
                "Usage:  sample [command] [arguments]",
            ));
    }

    #[test]
    fn unknown_command_suggests_help() {
        sample()
            .arg("xyzzy")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("sample: unknown command `xyzzy`"))
            .stderr(predicate::str::contains("Run 'sample help' for usage."));
    }
}

mod help_screens {
    use super::*;

    #[test]
    fn top_help_hides_advanced_items() {
        sample()
            .arg("help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Everyday commands."))
            .stdout(predicate::str::contains("greet"))
            .stdout(predicate::str::contains("GREET_STYLE"))
            .stdout(predicate::str::contains(
                "Use \"sample help --advanced\" to display all commands.",
            ))
            .stdout(predicate::str::contains("VERBOSE_DREAMS").not())
            .stdout(predicate::str::contains("resolved environment").not());
    }

    #[test]
    fn top_help_advanced_shows_everything() {
        sample()
            .args(["help", "--advanced"])
            .assert()
            .success()
            .stdout(predicate::str::contains("VERBOSE_DREAMS"))
            .stdout(predicate::str::contains("resolved environment"))
            .stdout(predicate::str::contains("help --advanced").not());
    }

    #[test]
    fn command_help_lists_flags() {
        sample()
            .args(["help", "greet"])
            .assert()
            .success()
            .stderr(predicate::str::contains("usage:  sample greet <who>"))
            .stderr(predicate::str::contains("--shout"));
    }

    #[test]
    fn command_help_flag_exits_two_with_same_screen() {
        sample()
            .args(["greet", "--help"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("usage:  sample greet <who>"));
    }
}

mod greet {
    use super::*;

    #[test]
    fn greets_with_the_default_style() {
        sample().args(["greet", "Bob"]).assert().success().stdout("Hi Bob!\n");
    }

    #[test]
    fn greets_with_a_present_style() {
        sample()
            .args(["greet", "Bob"])
            .env("GREET_STYLE", "Aloha")
            .assert()
            .success()
            .stdout("Aloha Bob!\n");
    }

    #[test]
    fn empty_present_style_is_not_the_default() {
        sample()
            .args(["greet", "Bob"])
            .env("GREET_STYLE", "")
            .assert()
            .success()
            .stdout(" Bob!\n");
    }

    #[test]
    fn shout_flag_goes_loud() {
        sample()
            .args(["greet", "--shout", "Bob"])
            .assert()
            .success()
            .stdout("HI BOB!\n");
    }

    #[test]
    fn more_than_one_person_is_an_error() {
        sample()
            .args(["greet", "Bob", "Alice"])
            .assert()
            .code(1)
            .stderr("sample: Can only greet one person at a time.\n");
    }

    #[test]
    fn prefix_resolves_to_greet() {
        sample().args(["gr", "Bob"]).assert().success().stdout("Hi Bob!\n");
    }

    #[test]
    fn typo_resolves_to_greet() {
        sample().args(["gret", "Bob"]).assert().success().stdout("Hi Bob!\n");
    }
}

mod ask {
    use super::*;

    #[test]
    fn nested_help_uses_the_composed_name() {
        sample()
            .args(["ask", "help"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Usage:  sample ask [command] [arguments]",
            ))
            .stdout(predicate::str::contains("apple"))
            .stdout(predicate::str::contains("beer").not());
    }

    #[test]
    fn arbitrary_gets_raw_arguments() {
        sample()
            .args(["ask", "arbitrary", "--flags", "--dont", "matter?"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "You asked: --flags --dont matter?",
            ));
    }

    #[test]
    fn arbitrary_requires_a_question() {
        sample()
            .args(["ask", "arbitrary", "no question"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "sample ask: expected a question ending with `?`.",
            ));
    }

    #[test]
    fn apple_succeeds() {
        sample()
            .args(["ask", "apple", "--bare"])
            .assert()
            .success()
            .stdout("apple\n");
    }

    #[test]
    fn advanced_beer_still_runs_and_fails() {
        sample()
            .args(["ask", "beer"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("BYOB"));
    }

    #[test]
    fn unknown_question_names_the_inner_application() {
        sample()
            .args(["ask", "wine"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains(
                "sample ask: unknown command `wine`",
            ));
    }
}

mod sleep {
    use super::*;

    #[test]
    fn zero_duration_is_rejected() {
        sample()
            .args(["sleep", "--duration", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "--duration must be a positive number of seconds",
            ));
    }

    #[test]
    fn negative_duration_is_parsed_then_rejected() {
        sample()
            .args(["sleep", "--duration", "-2"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--duration must be a positive"));
    }

    #[test]
    fn dreams_are_printed_when_toggled_on() {
        sample()
            .args(["sleep", "--duration", "1"])
            .env("VERBOSE_DREAMS", "1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Sleeping for 1s."))
            .stdout(predicate::str::contains("dreaming of sheep"));
    }
}

mod env_command {
    use super::*;

    #[test]
    fn prints_defaults_sorted_with_provenance() {
        sample()
            .arg("env")
            .assert()
            .success()
            .stdout("GREET_STYLE=Hi (default)\nVERBOSE_DREAMS= (default)\n");
    }

    #[test]
    fn marks_present_variables_even_when_empty() {
        sample()
            .arg("env")
            .env("VERBOSE_DREAMS", "")
            .assert()
            .success()
            .stdout("GREET_STYLE=Hi (default)\nVERBOSE_DREAMS= (present)\n");
    }

    #[test]
    fn only_flag_filters_to_one_variable() {
        sample()
            .args(["env", "--only", "GREET_STYLE"])
            .env("GREET_STYLE", "Yo")
            .assert()
            .success()
            .stdout("GREET_STYLE=Yo (present)\n");
    }
}
