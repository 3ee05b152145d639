use std::process::Child;
use std::thread;
use std::time::Duration;

use console::style;

use crate::git;

/// How long to wait after the rebase stops before feeding it commands, so a
/// manually opened editor has settled.
const EDITOR_SETTLE: Duration = Duration::from_secs(1);

/// Abstraction over running one generated command line.
///
/// The production implementation goes through the platform shell; tests use
/// a recording mock so the sequencing logic can be checked without a git
/// repository.
pub trait CommandRunner {
    /// Run a single command line to completion.
    fn call(&mut self, line: &str) -> Result<(), String>;
}

/// Default [`CommandRunner`] backed by [`git::shell_call`].
pub struct ShellCommandRunner;

impl CommandRunner for ShellCommandRunner {
    fn call(&mut self, line: &str) -> Result<(), String> {
        git::shell_call(line)
    }
}

/// Captured output of the rebase child after it stopped at its first edit.
pub struct RebaseStart {
    pub stdout: String,
    pub stderr: String,
}

/// Why driving a rebase session failed.
pub enum DriveError {
    /// The rebase never started usably; carries the child's stderr. No
    /// generated command was run.
    BadStart(String),
    /// A generated command failed partway through the sequence.
    Command(String),
}

/// True when the rebase's error stream indicates a bad upstream reference,
/// typically from asking for more commits than the history holds.
pub fn reports_invalid_upstream(stderr: &str) -> bool {
    stderr.contains("invalid")
}

/// Waits for the rebase child to stop and inspects its error stream.
///
/// `git rebase -i` exits once the todo list is processed up to the first
/// `edit` stop, so collecting the child's output both reaps the process and
/// yields whatever it printed. If the stderr contains the invalid-upstream
/// marker, the captured stderr is returned as the error and no generated
/// command must be run.
pub fn check_rebase_start(child: Child) -> Result<RebaseStart, String> {
    let out = match child.wait_with_output() {
        Ok(out) => out,
        Err(e) => return Err(format!("failed to collect rebase output: {}", e)),
    };

    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();

    if reports_invalid_upstream(&stderr) {
        return Err(stderr);
    }

    Ok(RebaseStart { stdout, stderr })
}

/// Sleeps long enough for an interactive editor spawned by the rebase to be
/// ready for input.
pub fn wait_for_editor() {
    thread::sleep(EDITOR_SETTLE);
}

/// Executes the generated command lines sequentially, printing progress.
///
/// Each command runs to completion before the next starts; the first failure
/// stops the sequence and is returned to the caller, which is expected to
/// abort the rebase.
pub fn execute<R: CommandRunner>(commands: &[String], runner: &mut R) -> Result<(), String> {
    let total = commands.len();
    for (i, command) in commands.iter().enumerate() {
        println!("{}", style(format!("Running command {} of {}", i + 1, total)).cyan());
        runner.call(command)?;
    }
    Ok(())
}

/// Drives a started rebase session to completion.
///
/// Gates on the start result first: a failed start (an invalid upstream, or
/// the child's output being unreadable) returns [`DriveError::BadStart`]
/// without running a single generated command. On a good start the child's
/// stdout is passed through so the operator sees where the rebase stopped,
/// the editor gets its settle time, and the command lines run in sequence.
pub fn drive<R: CommandRunner>(
    start: Result<RebaseStart, String>,
    commands: &[String],
    runner: &mut R,
) -> Result<(), DriveError> {
    let start = match start {
        Ok(start) => start,
        Err(stderr) => return Err(DriveError::BadStart(stderr)),
    };

    let stopped_at = start.stdout.trim();
    if !stopped_at.is_empty() {
        println!("{}", stopped_at);
    }

    wait_for_editor();
    execute(commands, runner).map_err(DriveError::Command)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingRunner {
        calls: Vec<String>,
        fail_on: Option<usize>,
    }

    impl CommandRunner for RecordingRunner {
        fn call(&mut self, line: &str) -> Result<(), String> {
            if self.fail_on == Some(self.calls.len()) {
                return Err(String::from("boom"));
            }
            self.calls.push(line.to_string());
            Ok(())
        }
    }

    #[test]
    fn executes_all_commands_in_order() {
        let commands = vec![
            String::from("amend one"),
            String::from("git rebase --continue"),
            String::from("amend two"),
        ];
        let mut runner = RecordingRunner { calls: Vec::new(), fail_on: None };

        execute(&commands, &mut runner).expect("execute failed");
        assert_eq!(runner.calls, commands);
    }

    #[test]
    fn stops_at_first_failure() {
        let commands = vec![
            String::from("first"),
            String::from("second"),
            String::from("third"),
        ];
        let mut runner = RecordingRunner { calls: Vec::new(), fail_on: Some(1) };

        let res = execute(&commands, &mut runner);
        assert!(res.is_err());
        assert_eq!(runner.calls, vec![String::from("first")]);
    }

    #[test]
    fn empty_command_list_is_a_noop() {
        let mut runner = RecordingRunner { calls: Vec::new(), fail_on: None };
        execute(&[], &mut runner).expect("execute failed");
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn invalid_upstream_marker_is_detected() {
        assert!(reports_invalid_upstream("fatal: invalid upstream 'HEAD~99'"));
        assert!(!reports_invalid_upstream("Stopped at abc123... first commit"));
        assert!(!reports_invalid_upstream(""));
    }

    #[test]
    fn bad_start_runs_no_commands() {
        let commands = vec![
            String::from("amend one"),
            String::from("git rebase --continue"),
        ];
        let mut runner = RecordingRunner { calls: Vec::new(), fail_on: None };
        let start = Err(String::from("fatal: invalid upstream 'HEAD~99'"));

        let res = drive(start, &commands, &mut runner);
        match res {
            Err(DriveError::BadStart(stderr)) => assert!(stderr.contains("invalid upstream")),
            _ => panic!("expected a bad-start error"),
        }
        assert!(runner.calls.is_empty(), "commands ran despite the bad start");
    }

    #[test]
    fn good_start_runs_the_full_sequence() {
        let commands = vec![String::from("amend one"), String::from("git rebase --continue")];
        let mut runner = RecordingRunner { calls: Vec::new(), fail_on: None };
        let start = Ok(RebaseStart {
            stdout: String::from("Stopped at abc123... first commit\n"),
            stderr: String::new(),
        });

        drive(start, &commands, &mut runner).unwrap_or_else(|_| panic!("drive failed"));
        assert_eq!(runner.calls, commands);
    }

    #[test]
    fn command_failure_is_distinguished_from_a_bad_start() {
        let commands = vec![String::from("amend one"), String::from("git rebase --continue")];
        let mut runner = RecordingRunner { calls: Vec::new(), fail_on: Some(1) };
        let start = Ok(RebaseStart { stdout: String::new(), stderr: String::new() });

        match drive(start, &commands, &mut runner) {
            Err(DriveError::Command(e)) => assert_eq!(e, "boom"),
            _ => panic!("expected a command error"),
        }
        assert_eq!(runner.calls, vec![String::from("amend one")]);
    }
}
