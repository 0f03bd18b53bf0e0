#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Cursor position after moving one step in `direction`, or `None` when the
/// move would leave `0..len`.
pub fn step(cursor: usize, len: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Next if cursor + 1 < len => Some(cursor + 1),
        Direction::Previous if cursor > 0 && len > 0 => Some(cursor - 1),
        _ => None,
    }
}
