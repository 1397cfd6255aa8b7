use run_in_terminal_core::Position;

/// Split `path[:line[:column]]` into the path and a 0-based cursor position.
///
/// Line and column are 1-based on the command line, matching what editors
/// display. Missing parts default to the start of the file.
pub fn parse_file_position(arg: &str) -> (String, Position) {
    let (rest, last) = match split_number(arg) {
        Some(split) => split,
        None => return (arg.to_string(), Position::default()),
    };

    match split_number(rest) {
        Some((path, line)) => (path.to_string(), Position::from_one_based(line, last)),
        None => (rest.to_string(), Position::from_one_based(last, 1)),
    }
}

fn split_number(arg: &str) -> Option<(&str, u32)> {
    let colon_pos = arg.rfind(':')?;
    let path_part = &arg[..colon_pos];
    let number = arg[colon_pos + 1..].parse::<u32>().ok()?;
    if path_part.is_empty() {
        return None;
    }
    Some((path_part, number))
}
