//! Key bindings: map terminal key events to per-game actions.
//!
//! These games are tap-driven, so there is no held-key repeat handling;
//! every press maps directly to one action or is ignored.

use crossterm::event::KeyCode;

/// Actions on the layered board, both disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MahjongAction {
    CursorPrev,
    CursorNext,
    Pick,
    Undo,
    Bomb,
    Hint,
    Shuffle,
    Restart,
    Quit,
}

pub fn mahjong_action(code: KeyCode) -> Option<MahjongAction> {
    match code {
        KeyCode::Left | KeyCode::Up | KeyCode::BackTab | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(MahjongAction::CursorPrev)
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Tab | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(MahjongAction::CursorNext)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(MahjongAction::Pick),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(MahjongAction::Undo),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(MahjongAction::Bomb),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(MahjongAction::Hint),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(MahjongAction::Shuffle),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MahjongAction::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MahjongAction::Quit),
        _ => None,
    }
}

/// Actions on the nonogram grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonogramAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Toggle-select the inventory block at this zero-based index.
    SelectBlock(usize),
    Rotate,
    Place,
    Remove,
    Quit,
}

pub fn nonogram_action(code: KeyCode) -> Option<NonogramAction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(NonogramAction::MoveUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(NonogramAction::MoveDown),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(NonogramAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(NonogramAction::MoveRight),
        KeyCode::Char(c @ '1'..='9') => {
            Some(NonogramAction::SelectBlock(c as usize - '1' as usize))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(NonogramAction::Rotate),
        KeyCode::Enter | KeyCode::Char(' ') => Some(NonogramAction::Place),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Backspace => {
            Some(NonogramAction::Remove)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(NonogramAction::Quit),
        _ => None,
    }
}

/// Actions on the merge board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Click,
    Spawn,
    /// Hand in the quest at this zero-based index in the current episode.
    Quest(usize),
    Quit,
}

pub fn merge_action(code: KeyCode) -> Option<MergeAction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(MergeAction::MoveUp),
        KeyCode::Down => Some(MergeAction::MoveDown),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(MergeAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(MergeAction::MoveRight),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MergeAction::Click),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(MergeAction::Spawn),
        KeyCode::Char(c @ '1'..='9') => Some(MergeAction::Quest(c as usize - '1' as usize)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MergeAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mahjong_bindings() {
        assert_eq!(mahjong_action(KeyCode::Tab), Some(MahjongAction::CursorNext));
        assert_eq!(mahjong_action(KeyCode::Enter), Some(MahjongAction::Pick));
        assert_eq!(mahjong_action(KeyCode::Char('b')), Some(MahjongAction::Bomb));
        assert_eq!(mahjong_action(KeyCode::Esc), Some(MahjongAction::Quit));
        assert_eq!(mahjong_action(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_nonogram_digit_selects_block() {
        assert_eq!(
            nonogram_action(KeyCode::Char('1')),
            Some(NonogramAction::SelectBlock(0))
        );
        assert_eq!(
            nonogram_action(KeyCode::Char('3')),
            Some(NonogramAction::SelectBlock(2))
        );
    }

    #[test]
    fn test_merge_quest_digits() {
        assert_eq!(merge_action(KeyCode::Char('2')), Some(MergeAction::Quest(1)));
        assert_eq!(merge_action(KeyCode::Char('s')), Some(MergeAction::Spawn));
    }
}
