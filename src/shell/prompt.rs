//! Line-oriented prompts over any reader/writer pair
//!
//! Every prompt returns `None` when input is exhausted.

use std::io::{BufRead, Write};

use crate::error::FinanceResult;

/// Print `prompt` and read one trimmed line
pub fn prompt_string<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> FinanceResult<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

/// Prompt with a bracketed default that an empty answer accepts
pub fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: &str,
) -> FinanceResult<Option<String>> {
    let answer = prompt_string(input, output, &format!("{} [{}]: ", label, default))?;

    Ok(answer.map(|a| if a.is_empty() { default.to_string() } else { a }))
}

/// Ask a yes/no question; an empty answer takes `default`
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: bool,
) -> FinanceResult<Option<bool>> {
    let hint = if default { "yes" } else { "no" };
    let answer = prompt_string(input, output, &format!("{} (yes/no) [{}]: ", question, hint))?;

    Ok(answer.map(|a| match a.to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }))
}
