use bitflags::bitflags;

bitflags! {
    /// Horizontal keys a menu may return on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LeftRight: u8 {
        const LEFT  = 0b01;
        const RIGHT = 0b10;
    }
}

/// How a render loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Selected(usize),
    /// Cancel key, or nothing to choose from.
    Cancelled,
    Left,
    Right,
}

impl MenuChoice {
    /// Integer form: the index for a selection, `-1` cancel, `-2` left,
    /// `-3` right.
    pub fn code(self) -> i64 {
        match self {
            MenuChoice::Selected(i) => i as i64,
            MenuChoice::Cancelled => -1,
            MenuChoice::Left => -2,
            MenuChoice::Right => -3,
        }
    }

    pub fn selected(self) -> Option<usize> {
        match self {
            MenuChoice::Selected(i) => Some(i),
            _ => None,
        }
    }
}
