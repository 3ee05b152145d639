use std::{fs, path::Path};

/// Entry point for `--sequence-editor` mode: rewrites the rebase todo file in
/// place so every pick becomes an edit stop.
///
/// Git invokes this binary with the todo file path when `GIT_SEQUENCE_EDITOR`
/// points at it; the amend/continue command pairs rely on the rebase stopping
/// at every commit.
pub fn run(todo_path: Option<&str>) -> Result<(), String> {
    let path = match todo_path {
        Some(p) => Path::new(p),
        None => return Err(String::from("missing todo file path")),
    };

    let body = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return Err(format!("read failed: {}", e)),
    };

    match fs::write(path, mark_all_edit(&body)) {
        Ok(()) => Ok(()),
        Err(e) => Err(format!("write failed: {}", e)),
    }
}

/// Rewrites a rebase todo body, turning every `pick` (or its short form `p`)
/// action into `edit`.
///
/// Comment lines and other actions (`squash`, `exec`, ...) pass through
/// unchanged, and leading indentation is preserved.
///
/// Line endings are normalized to exactly one `\n` per line: a body missing
/// its final newline gains one, and an empty body stays empty. Git accepts
/// either shape for a todo file.
pub fn mark_all_edit(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    for line in body.lines() {
        out.push_str(&transform_line(line));
        out.push('\n');
    }
    out
}

fn transform_line(line: &str) -> String {
    let trimmed = line.trim_start();

    if trimmed.starts_with('#') {
        return line.to_string();
    }

    let rest = if let Some(r) = trimmed.strip_prefix("pick ") {
        r
    } else if let Some(r) = trimmed.strip_prefix("p ") {
        r
    } else {
        return line.to_string();
    };

    let indent = &line[..line.len() - trimmed.len()];
    format!("{}edit {}", indent, rest)
}
