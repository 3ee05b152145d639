use crate::{banner::print_banner, commands, driver, git, prompt, sequence_editor, timestamps};

use console::style;
use std::{env, path::Path};

/// Default range start used when the date prompts are left blank; kept in
/// 1988 so test runs are unmistakable in the log.
const DEFAULT_START_DATE: &str = "1988-01-01T12:34:56";

/// Default range end used when the date prompts are left blank.
const DEFAULT_END_DATE: &str = "1988-12-25T12:34:56";

/// Everything collected during setup, before the rebase is spawned.
struct RebasePlan {
    start_date: String,
    end_date: String,
    commit_count: usize,
    command_lines: Vec<String>,
}

/// Verifies git is available on the PATH.
fn verify_git() -> Result<(), ()> {
    match which::which("git") {
        Ok(_) => Ok(()),
        Err(_) => {
            eprintln!("{}", style("Error: `git` not found in PATH.").red().bold());
            Err(())
        }
    }
}

/// Moves into the repository the operator wants to rewrite.
///
/// Prompts for a path (blank keeps the current directory), changes into it,
/// shows the `git log --graph` listing, and asks for confirmation. Declining
/// re-prompts for another path; the loop only returns once the operator has
/// confirmed a repository.
fn select_repo<S, C>(paths: &mut S, confirms: &mut C) -> Result<(), String>
where
    S: prompt::StringPrompter,
    C: prompt::ConfirmPrompter,
{
    loop {
        let path = prompt::ask_repo_path(paths)?;
        if !path.is_empty() {
            if let Err(e) = env::set_current_dir(Path::new(&path)) {
                eprintln!(
                    "{}",
                    style(format!("Cannot enter `{}`: {}", path, e)).red().bold()
                );
                continue;
            }
        }

        let root = match git::rev_parse("--show-toplevel") {
            Ok(s) => s,
            Err(e) => {
                eprintln!(
                    "{}",
                    style(format!("Error: not inside a git repo ({})", e)).red().bold()
                );
                continue;
            }
        };

        println!("{}", root);
        match git::log_graph() {
            Ok(graph) => println!("{}", graph),
            Err(e) => {
                eprintln!("{}", style(format!("Cannot read history: {}", e)).red().bold());
                continue;
            }
        }

        if prompt::confirm_repo(confirms)? {
            return Ok(());
        }
    }
}

/// Asks for a date until it parses in the fixed pattern.
fn ask_validated_date<P: prompt::StringPrompter>(
    prompter: &mut P,
    label: &str,
    default_value: &str,
) -> Result<String, String> {
    loop {
        let candidate = prompt::ask_date(prompter, label, default_value)?;
        match timestamps::parse_date(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) => eprintln!("{}", style(e).yellow()),
        }
    }
}

/// Collects commit count and date range, then generates the timestamps and
/// the command lines that will drive the rebase.
///
/// Invalid answers re-prompt; an `Err` here means input itself failed
/// (e.g. the operator interrupted a prompt).
fn collect_plan<P: prompt::StringPrompter>(prompter: &mut P) -> Result<RebasePlan, String> {
    let commit_count = prompt::ask_commit_count(prompter)?;

    let start_date = ask_validated_date(prompter, "New start date", DEFAULT_START_DATE)?;
    let end_date = ask_validated_date(prompter, "New end date", DEFAULT_END_DATE)?;

    let mut rng = rand::thread_rng();
    let stamps = timestamps::generate(&start_date, &end_date, commit_count, &mut rng)?;
    let command_lines = commands::generate(&stamps, commands::Shell::native());

    Ok(RebasePlan { start_date, end_date, commit_count, command_lines })
}

/// Spawns the rebase and feeds it the generated command lines.
fn run_rebase(plan: &RebasePlan, manual_mode: bool) -> Result<(), ()> {
    let auto_mark_all = !manual_mode;
    let child = match git::spawn_rebase(plan.commit_count, auto_mark_all) {
        Ok(child) => child,
        Err(e) => {
            eprintln!("{}", style(format!("❌ Rebase failed to start: {}", e)).red().bold());
            return Err(());
        }
    };

    let start = driver::check_rebase_start(child);
    let mut runner = driver::ShellCommandRunner;
    match driver::drive(start, &plan.command_lines, &mut runner) {
        Ok(()) => {
            println!("{}", style("✅ Successfully rewrote commit dates.").green().bold());
            Ok(())
        }
        Err(driver::DriveError::BadStart(stderr)) => {
            eprintln!(
                "{}",
                style("❌ An invalid upstream was specified. Did you select too many commits?")
                    .red()
                    .bold()
            );
            eprintln!("Submitted command: git rebase -i HEAD~{}", plan.commit_count);
            eprintln!("Returned error: {}", stderr.trim());
            abort_with_notice();
            Err(())
        }
        Err(driver::DriveError::Command(e)) => {
            eprintln!("{}", style(format!("❌ An error occurred: {}", e)).red().bold());
            abort_with_notice();
            Err(())
        }
    }
}

/// Runs `git rebase --abort` and tells the operator, ignoring abort failures
/// (there is nothing further to clean up).
fn abort_with_notice() {
    let _ = git::rebase_abort();
    eprintln!("{}", style("The rebase has been aborted.").yellow().bold());
}

/// Prints usage information to stdout.
fn print_help() {
    println!(
        "\
git-date-rewrite {}

Rewrite commit dates across recent history via interactive rebase.

USAGE:
    git-date-rewrite [OPTIONS]

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information
    --manual         Edit the rebase todo list manually instead of auto-marking all commits

DESCRIPTION:
    This tool prompts for a repository, a date range, and a commit count,
    generates that many random timestamps constrained to waking hours
    (05:00-23:00), then rebases the last N commits and amends each one with
    the next timestamp, oldest first. Author and committer dates are both
    rewritten.

    In auto mode (default), all commits are automatically marked for editing.
    In manual mode (--manual), you choose which commits to edit.",
        env!("CARGO_PKG_VERSION")
    );
}

/// Main CLI entry point for `git-date-rewrite`.
///
/// This function:
/// 1. Handles the special `--sequence-editor` invocation.
/// 2. Parses CLI flags (currently only `--manual`).
/// 3. Verifies that `git` is installed, then prompts for and confirms the
///    repository to rewrite.
/// 4. Prompts for commit count and date range (with 1988 testing defaults),
///    generating the sorted waking-hours timestamps and command lines.
/// 5. Shows a banner and asks for final confirmation.
/// 6. Spawns `git rebase -i HEAD~N`, checks its error stream for an invalid
///    upstream, then executes the amend/continue command pairs in order.
///
/// Returns `Ok(exit_code)` on success, or `Err(())` on error. A prompt
/// failure after the repository is selected (typically an interrupt) aborts
/// any rebase in progress before returning.
pub fn entry() -> Result<i32, ()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(0);
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("git-date-rewrite {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    // Special case: act as git's sequence editor if invoked with that flag.
    if args.len() >= 2 && args[1] == "--sequence-editor" {
        let path = args.get(2).map(|s| s.as_str());
        match sequence_editor::run(path) {
            Ok(_) => {
                return Ok(0);
            }
            Err(e) => {
                eprintln!("{}", style(format!("Sequence editor error: {}", e)).red().bold());
                return Err(());
            }
        }
    }

    let manual_mode = args.iter().any(|a| a == "--manual");

    verify_git()?;

    let mut string_prompter = prompt::DialoguerStringPrompter;
    let mut confirm_prompter = prompt::DialoguerConfirmPrompter;

    match select_repo(&mut string_prompter, &mut confirm_prompter) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{}", style(format!("Prompt error: {}", e)).red().bold());
            return Err(());
        }
    }

    let plan = match collect_plan(&mut string_prompter) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{}", style(format!("Setup failed: {}", e)).red().bold());
            abort_with_notice();
            return Err(());
        }
    };

    print_banner(&plan.start_date, &plan.end_date, plan.commit_count, manual_mode);

    match prompt::confirm_start(&mut confirm_prompter) {
        Ok(true) => {
            run_rebase(&plan, manual_mode)?;
        }
        Ok(false) => {
            println!("{}", style("Canceled by user. No changes made.").yellow().bold());
            return Ok(0);
        }
        Err(e) => {
            eprintln!("{}", style(format!("Prompt error: {}", e)).red().bold());
            abort_with_notice();
            return Err(());
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct ScriptedPrompter {
        responses: VecDeque<String>,
    }

    impl prompt::StringPrompter for ScriptedPrompter {
        fn prompt(&mut self, _prompt: &str, default: &str) -> Result<String, String> {
            match self.responses.pop_front() {
                Some(r) => Ok(r),
                None => Ok(default.to_string()),
            }
        }
    }

    #[test]
    fn collect_plan_builds_paired_commands() {
        let mut prompter = ScriptedPrompter {
            responses: VecDeque::from(vec![
                String::from("3"), // commit count
                String::from(""),  // start date -> default
                String::from(""),  // end date -> default
            ]),
        };

        let plan = collect_plan(&mut prompter).expect("collect_plan failed");
        assert_eq!(plan.commit_count, 3);
        assert_eq!(plan.start_date, DEFAULT_START_DATE);
        assert_eq!(plan.end_date, DEFAULT_END_DATE);
        assert_eq!(plan.command_lines.len(), 6);
        assert_eq!(plan.command_lines[1], "git rebase --continue");
        assert!(plan.command_lines[0].contains("1988-"));
    }

    #[test]
    fn collect_plan_recovers_from_bad_count_and_date() {
        let mut prompter = ScriptedPrompter {
            responses: VecDeque::from(vec![
                String::from("lots"),       // rejected count
                String::from("2"),          // accepted count
                String::from("not-a-date"), // rejected start date
                String::from("1999-05-01T10:00:00"),
                String::from("1999-06-01T10:00:00"),
            ]),
        };

        let plan = collect_plan(&mut prompter).expect("collect_plan failed");
        assert_eq!(plan.commit_count, 2);
        assert_eq!(plan.start_date, "1999-05-01T10:00:00");
        assert_eq!(plan.command_lines.len(), 4);
    }
}
