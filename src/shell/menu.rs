use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// What the user picked from the numbered menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the offered paths
    Chosen(usize),
    /// `q`, `0` or end of input
    Quit,
    /// Anything that is not a listed number
    Invalid,
}

/// Turn a 1-based menu answer into a zero-based index
///
/// Returns `None` unless `input` is a whole number between 1 and
/// `option_count`.
pub fn validate_choice(input: &str, option_count: usize) -> Option<usize> {
    let number: usize = input.trim().parse().ok()?;
    if number == 0 || number > option_count {
        return None;
    }
    Some(number - 1)
}

/// Interpret one line of menu input
pub fn parse_selection(input: &str, option_count: usize) -> Selection {
    let answer = input.trim();
    if answer.eq_ignore_ascii_case("q") || answer == "0" {
        return Selection::Quit;
    }
    match validate_choice(answer, option_count) {
        Some(index) => Selection::Chosen(index),
        None => Selection::Invalid,
    }
}

/// Write the numbered menu for `paths`
pub fn render_menu<W: Write>(paths: &[String], output: &mut W) -> Result<()> {
    for (index, path) in paths.iter().enumerate() {
        writeln!(output, "{}) {}", index + 1, path).context("Failed to write menu")?;
    }
    Ok(())
}

/// Show the menu, ask for a choice and read one line of `input`
pub fn prompt_selection<R, W>(paths: &[String], input: &mut R, output: &mut W) -> Result<Selection>
where
    R: BufRead,
    W: Write,
{
    render_menu(paths, output)?;
    write!(output, "Select a project: ").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read selection")?;
    if read == 0 {
        return Ok(Selection::Quit);
    }

    Ok(parse_selection(&answer, paths.len()))
}
