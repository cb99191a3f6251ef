/// Which way the operator is walking the playlist. Only an explicit move to
/// the previous entry flips it to `Backward`; it persists otherwise and
/// decides which way unreadable entries are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Discrete command events consumed by the review session. The app layer
/// translates raw keystrokes into these; `EndOfInput` stands for a closed or
/// interrupted keystroke stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Mark,
    Unmark,
    Quit,
    Unknown(char),
    EndOfInput,
}
