pub mod employees;
pub mod init;

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Print `label` and read one line from stdin. `None` on end of input.
pub(crate) fn prompt(label: &str) -> Result<Option<String>> {
    prompt_from(&mut io::stdin().lock(), &mut io::stdout(), label)
}

/// Ask a yes/no question; anything but `y` means no. Read errors propagate.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    confirm_from(&mut io::stdin().lock(), &mut io::stdout(), question)
}

fn prompt_from<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn confirm_from<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    let answer = prompt_from(input, out, &format!("{question} [y/N] "))?;
    Ok(answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")))
}
