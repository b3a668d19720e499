//! Shell quoting and masking of credential options in command lines.

use std::borrow::Cow;

/// Options whose values never appear in logs or error messages.
const SENSITIVE_OPTIONS: [&str; 3] = ["--access-key=", "--secret-key=", "--password="];

/// Replacement for masked option values.
pub const MASK: &str = "******";

/// Quotes `arg` for `sh` unless it only holds characters the shell treats
/// literally.
pub fn quote(arg: &str) -> Cow<'_, str> {
    let literal = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));

    if literal {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Masks the values of credential options (`--secret-key=...` and friends)
/// in a command line. Values may be bare or quoted with [`quote`].
pub fn redact(command: &str) -> String {
    let mut redacted = String::with_capacity(command.len());
    let mut rest = command;

    while let Some((at, option)) = next_sensitive_option(rest) {
        let value_start = at + option.len();
        redacted.push_str(&rest[..value_start]);
        redacted.push_str(MASK);
        rest = &rest[value_start + word_len(&rest[value_start..])..];
    }

    redacted.push_str(rest);
    redacted
}

fn next_sensitive_option(command: &str) -> Option<(usize, &'static str)> {
    SENSITIVE_OPTIONS
        .iter()
        .filter_map(|option| command.find(option).map(|at| (at, *option)))
        .min_by_key(|(at, _)| *at)
}

/// Byte length of the shell word at the start of `s`.
fn word_len(s: &str) -> usize {
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !quoted => escaped = true,
            '\'' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => return i,
            _ => {}
        }
    }

    s.len()
}
