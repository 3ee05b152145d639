use std::process::{Child, Command, Stdio};

/// Builds the value for the `GIT_SEQUENCE_EDITOR` environment variable.
///
/// Wraps `exe_path` in quotes if it contains spaces, and appends the
/// `--sequence-editor` argument so git re-invokes this binary on the rebase
/// todo file.
pub(crate) fn build_sequence_editor_env(exe_path: &str) -> String {
    let quoted = if exe_path.contains(' ') {
        format!("\"{}\"", exe_path)
    } else {
        exe_path.to_string()
    };

    format!("{quoted} --sequence-editor")
}

/// Runs a command and returns only its exit status.
///
/// * `Ok(())` if the command exits with status `0`.
/// * `Err("non-zero exit")` on a non-zero status.
/// * `Err` with the I/O error message if the process fails to start.
fn run_status(mut cmd: Command) -> Result<(), String> {
    match cmd.status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(String::from("non-zero exit"))
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs a command and returns its trimmed stdout on success, or its trimmed
/// stderr (or spawn error) as an `Err` on failure.
fn run_output(mut cmd: Command) -> Result<String, String> {
    match cmd.output() {
        Ok(out) => {
            if out.status.success() {
                Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
            } else {
                Err(String::from_utf8_lossy(&out.stderr).trim().to_string())
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs `git rev-parse <flag>` and returns its output as a trimmed string.
///
/// Used to query repository metadata such as the repository root
/// (`--show-toplevel`) before any history rewriting starts.
pub fn rev_parse(flag: &str) -> Result<String, String> {
    let mut cmd = Command::new("git");
    cmd.arg("rev-parse").arg(flag);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
}

/// Returns a compact `git log --graph` listing with one
/// `hash date subject` line per commit, dates in the same textual pattern
/// the timestamp generator emits.
///
/// Shown to the operator so they can confirm the repository (and its current
/// dates) before the rebase touches anything.
pub fn log_graph() -> Result<String, String> {
    let mut cmd = Command::new("git");
    cmd.arg("log")
        .arg("--graph")
        .arg("--pretty=format:%h %ad %s")
        .arg("--date=format-local:%Y-%m-%dT%H:%M:%S")
        .arg("--abbrev-commit");
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
}

/// Spawns `git rebase -i HEAD~<commit_count>` with all three standard streams
/// piped, returning the child process.
///
/// The caller is expected to collect the child's output and inspect its
/// stderr before driving the rebase; see `driver::check_rebase_start`.
///
/// If `auto_mark_all` is set, `GIT_SEQUENCE_EDITOR` is pointed at this binary
/// in `--sequence-editor` mode so every `pick` in the todo list is rewritten
/// to `edit` without the operator's editor opening. With it unset, git opens
/// the configured editor and the operator marks commits manually.
///
/// # Parameters
///
/// * `commit_count` — How many commits back from `HEAD` to rebase.
/// * `auto_mark_all` — Rewrite the todo list automatically when `true`.
///
/// # Returns
///
/// * `Ok(Child)` once the rebase process has been spawned.
/// * `Err(String)` if the executable path cannot be resolved or the spawn
///   fails.
pub fn spawn_rebase(commit_count: usize, auto_mark_all: bool) -> Result<Child, String> {
    let mut cmd = Command::new("git");
    cmd.arg("rebase").arg("-i").arg(format!("HEAD~{}", commit_count));
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if auto_mark_all {
        match std::env::current_exe() {
            Ok(path) => {
                let p = path.to_string_lossy();
                cmd.env("GIT_SEQUENCE_EDITOR", build_sequence_editor_env(&p));
            }
            Err(e) => {
                return Err(format!("cannot locate current executable: {}", e));
            }
        }
    }

    match cmd.spawn() {
        Ok(child) => Ok(child),
        Err(e) => Err(format!("failed to start `git rebase -i`: {}", e)),
    }
}

/// Aborts an in-progress rebase via `git rebase --abort`.
///
/// Output streams are inherited so git's own message reaches the operator.
pub fn rebase_abort() -> Result<(), String> {
    let mut cmd = Command::new("git");
    cmd.arg("rebase").arg("--abort");
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());
    run_status(cmd).map_err(|_| String::from("`git rebase --abort` returned non-zero"))
}

/// Runs one generated command line through the platform shell.
///
/// The lines produced by `commands::generate` are full shell invocations
/// (nested `cmd /v /c` calls on Windows, variable-prefixed commands on
/// POSIX), so they must go through a shell rather than a direct exec.
pub fn shell_call(line: &str) -> Result<(), String> {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(line);
        c
    };
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());
    run_status(cmd).map_err(|e| format!("`{}` failed: {}", line, e))
}
