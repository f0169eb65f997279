use crate::{
    config::Allowlist,
    errors::{ShellError, ShellResult},
};

/// Check a command and its first argument against the allowlist
///
/// Returns the canonical (lower-cased) program name to spawn. Only the first
/// argument is inspected, and only when the entry restricts arguments.
pub fn validate_command<'a>(
    allowlist: &'a Allowlist,
    command: &str,
    args: &[String],
) -> ShellResult<&'a str> {
    let Some((program, permitted)) = allowlist.lookup(command) else {
        return Err(ShellError::CommandNotAllowed {
            command: command.to_string(),
        });
    };

    if let Some(first) = args.first()
        && !permitted.is_empty()
        && !permitted.contains(first)
    {
        return Err(ShellError::ArgumentNotAllowed {
            command: command.to_string(),
            argument: first.clone(),
        });
    }

    Ok(program)
}
