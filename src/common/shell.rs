//! Shell quoting for human-readable command lines.
//!
//! Commands are never run through a shell; quoting is only used when a command
//! line is printed in debug traces, so the user can copy and re-run it.

/// Quote an argument for display only if it contains characters with special
/// meaning in the shell. Single quotes are used for safety.
pub fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }

    if s.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '=' | '/' | '.' | ':' | ','))
    {
        return s.to_string();
    }

    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Render a program and its arguments as a single copy-pasteable line.
pub fn command_line<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    std::iter::once(shell_quote(program))
        .chain(args.iter().map(|a| shell_quote(a.as_ref())))
        .collect::<Vec<_>>()
        .join(" ")
}
