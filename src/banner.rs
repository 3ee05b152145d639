use console::{measure_text_width, style};
use std::iter;

/// Prints a decorative, colorized banner summarizing the date-rewrite run.
///
/// The banner is dynamically sized to fit the widest **visible** line of
/// text, using [`console::measure_text_width`] so ANSI color codes inside
/// the content do not skew the padding. It is framed with Unicode
/// box-drawing characters (`╔═╗`, `║ ║`, `╚═╝`) and styled with
/// [`console::style`].
///
/// # Parameters
///
/// * `start_date` – Start of the new date range.
/// * `end_date` – End of the new date range.
/// * `commit_count` – How many commits will be amended.
/// * `manual_mode` – When `true`, shows manual todo-editing instructions;
///   otherwise describes the automatic pick-to-edit rewrite.
pub fn print_banner(start_date: &str, end_date: &str, commit_count: usize, manual_mode: bool) {
    let lines = banner_lines(start_date, end_date, commit_count, manual_mode);

    let max_width = lines
        .iter()
        .map(|l| measure_text_width(l)) // ignore ANSI in content
        .max()
        .unwrap_or(0)
        + 2;

    let border = "═".repeat(max_width);
    let top = style(format!("╔{}╗", border)).blue().bold();
    let bottom = style(format!("╚{}╝", border)).blue().bold();
    let left = style("║ ").blue().bold().to_string();
    let right = style("║").blue().bold().to_string();

    println!();
    println!("{top}");
    for line in lines {
        let visible = measure_text_width(&line);
        let pad = max_width - visible; // includes the one space after left border
        println!("{}{}{}{}", left, line, " ".repeat(pad - 1), right);
    }
    println!("{bottom}");
    println!();
}

/// Constructs the banner lines: title, mode instructions, range summary,
/// and the steps the tool performs.
///
/// Some lines carry ANSI styling; consumers measuring width should use
/// `console::measure_text_width` rather than `str::len()`.
fn banner_lines(
    start_date: &str,
    end_date: &str,
    commit_count: usize,
    manual_mode: bool,
) -> Vec<String> {
    let top = ["Rewrite commit dates via interactive rebase", ""]
        .into_iter()
        .map(|s| s.to_string());

    let mode = if manual_mode {
        vec![
            style("Manual mode: your editor opens the todo list.")
                .yellow()
                .bold()
                .to_string(),
            style("Tip: mark every commit you want re-dated as `edit`.")
                .yellow()
                .bold()
                .to_string(),
        ]
    } else {
        vec![
            style("Auto mode: all `pick` lines will be changed to `edit`.")
                .cyan()
                .bold()
                .to_string(),
            style("(Use --manual to keep your editor and control which commits to edit.)")
                .cyan()
                .to_string(),
        ]
    }
    .into_iter();

    let bottom = iter::once(String::new())
        .chain(iter::once(format!(
            "New dates will fall between {} and {} ({} commits)",
            start_date, end_date, commit_count
        )))
        .chain(
            [
                "within waking hours (05:00-23:00). This tool will:",
                "  1) Amend each stop with a random date from the range",
                "  2) Run `git rebase --continue` until finished",
            ]
            .into_iter()
            .map(|s| s.to_string()),
        );

    top.chain(mode).chain(bottom).collect()
}

#[cfg(test)]
mod tests {
    use super::banner_lines;

    #[test]
    fn auto_mode_banner_mentions_range_and_rewrite() {
        let lines = banner_lines("1988-01-01T12:34:56", "1988-12-25T12:34:56", 5, false);
        let s = lines.join("\n");

        assert!(s.contains("Rewrite commit dates via interactive rebase"));
        assert!(s.contains("Auto mode: all `pick` lines will be changed to `edit`."));
        assert!(s.contains("between 1988-01-01T12:34:56 and 1988-12-25T12:34:56 (5 commits)"));
        assert!(s.contains("05:00-23:00"));
    }

    #[test]
    fn manual_mode_banner_shows_editing_tip() {
        let lines = banner_lines("2020-01-01T00:00:00", "2020-02-01T00:00:00", 2, true);
        let s = lines.join("\n");

        assert!(s.contains("Manual mode: your editor opens the todo list."));
        assert!(s.contains("mark every commit you want re-dated as `edit`"));
    }
}
