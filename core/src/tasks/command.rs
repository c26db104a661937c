/// Split a command line into the executable and its arguments.
/// A quoted first token is trusted as the executable. Quotes inside the arguments are left alone
pub fn split_command(command: &str) -> (String, String) {
    let command = command.trim();
    if let Some(split) = split_quoted(command) {
        return split;
    }

    if let Some(index) = command.find(char::is_whitespace) {
        let (executable, remaining) = command.split_at(index);
        let arguments = remaining.trim_start();
        if !executable.is_empty() && !arguments.is_empty() {
            return (executable.to_string(), arguments.to_string());
        }
    }

    (command.to_string(), String::new())
}

/// Executable wrapped in single or double quotes, followed by whitespace and arguments
fn split_quoted(command: &str) -> Option<(String, String)> {
    let mut chars = command.char_indices();
    let (_, first) = chars.next()?;
    if first != '"' && first != '\'' {
        return None;
    }

    // Closing quote may be either kind. Use the first one that is followed by arguments
    for (index, value) in chars {
        if value != '"' && value != '\'' || index == first.len_utf8() {
            continue;
        }
        let remaining = &command[index + value.len_utf8()..];
        if !remaining.starts_with(char::is_whitespace) {
            continue;
        }
        let arguments = remaining.trim_start();
        if arguments.is_empty() {
            continue;
        }
        let executable = &command[first.len_utf8()..index];
        return Some((executable.to_string(), arguments.to_string()));
    }
    None
}

/// Format the `/TR` option for schtasks. The executable is always re-quoted when there are arguments
pub fn command_option(executable: &str, arguments: &str) -> String {
    if arguments.is_empty() {
        format!("/TR \"{executable}\"")
    } else {
        format!("/TR \"\\\"{executable}\\\" {arguments}\"")
    }
}

/// Split then format a full command line as a `/TR` option
pub fn task_run_option(command: &str) -> String {
    let (executable, arguments) = split_command(command);
    command_option(&executable, &arguments)
}
