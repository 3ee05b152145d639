/// Shell dialect the generated command lines target.
///
/// The committer date has to be scoped to a single `git commit` invocation,
/// and the two shells express that differently: `cmd.exe` needs a nested
/// `cmd /v /c "set ...&& ..."` call, POSIX shells take a plain variable
/// prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Cmd,
    Posix,
}

impl Shell {
    /// The shell of the build target.
    pub fn native() -> Self {
        if cfg!(windows) { Shell::Cmd } else { Shell::Posix }
    }
}

/// Renders the command that amends the current rebase stop with `timestamp`
/// as both author date and committer date.
fn amend_command(timestamp: &str, shell: Shell) -> String {
    match shell {
        Shell::Cmd => {
            // No space before the `&&`: cmd would fold it into the variable value.
            format!(
                "cmd /v /c \"set GIT_COMMITTER_DATE={ts}&& git commit --no-edit --amend --date='{ts}'\"",
                ts = timestamp
            )
        }
        Shell::Posix => format!(
            "GIT_COMMITTER_DATE={ts} git commit --no-edit --amend --date='{ts}'",
            ts = timestamp
        ),
    }
}

/// Expands sorted timestamps into the command lines that drive the rebase.
///
/// Each timestamp becomes two lines, in order: first the scoped
/// set-committer-date-and-amend invocation, then `git rebase --continue` to
/// move to the next stop. The output therefore holds exactly twice as many
/// lines as there are timestamps, and executing them in sequence rewrites
/// the commits oldest to newest.
pub fn generate(timestamps: &[String], shell: Shell) -> Vec<String> {
    let mut commands = Vec::with_capacity(timestamps.len() * 2);
    for timestamp in timestamps {
        commands.push(amend_command(timestamp, shell));
        commands.push(String::from("git rebase --continue"));
    }
    commands
}
