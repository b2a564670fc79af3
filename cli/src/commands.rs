use arcade_core::games::puzzle2048::Direction;

#[derive(Debug, PartialEq, Eq)]
pub enum PuzzleInput {
    Move(Direction),
    Reset,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MemoryInput {
    Start,
    Flip(u32),
    Pause,
    Resume,
    /// New grid size, or the current one.
    Reset(Option<usize>),
    Scores,
    Quit,
}

pub const PUZZLE_HELP: &str = "w/a/s/d or up/left/down/right to move, r to reset, q to quit";
pub const MEMORY_HELP: &str =
    "start | flip <id> | pause | resume | reset [size] | scores | q to quit";

pub fn parse_puzzle_input(line: &str) -> Option<PuzzleInput> {
    let input = match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => PuzzleInput::Move(Direction::Up),
        "a" | "left" => PuzzleInput::Move(Direction::Left),
        "s" | "down" => PuzzleInput::Move(Direction::Down),
        "d" | "right" => PuzzleInput::Move(Direction::Right),
        "r" | "reset" => PuzzleInput::Reset,
        "q" | "quit" => PuzzleInput::Quit,
        _ => return None,
    };
    Some(input)
}

pub fn parse_memory_input(line: &str) -> Option<MemoryInput> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?.to_ascii_lowercase();
    let argument = parts.next();
    if parts.next().is_some() {
        return None;
    }

    match (command.as_str(), argument) {
        ("start", None) => Some(MemoryInput::Start),
        ("flip" | "f", Some(id)) => id.parse().ok().map(MemoryInput::Flip),
        ("pause", None) => Some(MemoryInput::Pause),
        ("resume", None) => Some(MemoryInput::Resume),
        ("reset" | "r", None) => Some(MemoryInput::Reset(None)),
        ("reset" | "r", Some(size)) => size.parse().ok().map(|size| MemoryInput::Reset(Some(size))),
        ("scores", None) => Some(MemoryInput::Scores),
        ("q" | "quit", None) => Some(MemoryInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzle_keys_and_words() {
        assert_eq!(parse_puzzle_input("w"), Some(PuzzleInput::Move(Direction::Up)));
        assert_eq!(parse_puzzle_input(" LEFT \n"), Some(PuzzleInput::Move(Direction::Left)));
        assert_eq!(parse_puzzle_input("r"), Some(PuzzleInput::Reset));
        assert_eq!(parse_puzzle_input("jump"), None);
    }

    #[test]
    fn test_memory_flip_needs_numeric_id() {
        assert_eq!(parse_memory_input("flip 12"), Some(MemoryInput::Flip(12)));
        assert_eq!(parse_memory_input("f 3"), Some(MemoryInput::Flip(3)));
        assert_eq!(parse_memory_input("flip"), None);
        assert_eq!(parse_memory_input("flip x"), None);
        assert_eq!(parse_memory_input("flip 1 2"), None);
    }

    #[test]
    fn test_memory_reset_with_optional_size() {
        assert_eq!(parse_memory_input("reset"), Some(MemoryInput::Reset(None)));
        assert_eq!(parse_memory_input("reset 6"), Some(MemoryInput::Reset(Some(6))));
        assert_eq!(parse_memory_input("start now"), None);
        assert_eq!(parse_memory_input(""), None);
    }
}
