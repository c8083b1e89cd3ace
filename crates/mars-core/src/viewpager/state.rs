/// How an item is positioned on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Resting, fully visible, scrollable, accepts gestures
    Settled,
    /// Positioned off-stage, sliding toward its offset
    #[default]
    Transitioning,
}

/// Animation state of one item in the deck
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemState {
    /// Target position in whole viewport widths relative to the current item
    /// (0 = current, -1 = previous, +1 = next)
    pub offset: i32,
    /// Live horizontal drag adjustment in columns
    pub drag_delta: f64,
    /// Mounted; only items next to the current one are
    pub visible: bool,
    pub role: Role,
}

impl ItemState {
    pub fn is_settled(&self) -> bool {
        self.role == Role::Settled
    }
}

/// Whether `index` falls inside the window around `current`
#[inline]
pub fn in_window(index: usize, current: usize) -> bool {
    index.abs_diff(current) <= 1
}

/// Offset of `index` relative to `current` in whole items
#[inline]
pub fn relative_offset(index: usize, current: usize) -> i32 {
    if index >= current {
        i32::try_from(index - current).unwrap_or(i32::MAX)
    } else {
        i32::try_from(current - index).map_or(i32::MIN, |d| -d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_window() {
        assert!(in_window(0, 0));
        assert!(in_window(0, 1));
        assert!(in_window(2, 1));
        assert!(!in_window(3, 1));
        assert!(!in_window(0, 2));
    }

    #[test]
    fn test_relative_offset() {
        assert_eq!(relative_offset(0, 1), -1);
        assert_eq!(relative_offset(1, 1), 0);
        assert_eq!(relative_offset(4, 1), 3);
    }
}
