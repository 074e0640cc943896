pub const CONTAINER_ROWS: u8 = 5;
pub const CONTAINER_COLUMNS: u8 = 6;
pub const CONTAINER_SLOTS: u16 = CONTAINER_ROWS as u16 * CONTAINER_COLUMNS as u16;

/// What moved after a call to [`PositionTracker::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Row,
    Column,
    /// The container is full. The cursor has to be taken to the first
    /// cell of the next one before placing anything else.
    Container,
}

/// Next free cell of the container being filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionTracker {
    row: u8,
    column: u8,
    containers_advanced: u16,
}

impl PositionTracker {
    pub const fn new() -> Self {
        Self {
            row: 0,
            column: 0,
            containers_advanced: 0,
        }
    }

    #[inline]
    pub fn row(&self) -> u8 {
        self.row
    }

    #[inline]
    pub fn column(&self) -> u8 {
        self.column
    }

    #[inline]
    pub fn containers_advanced(&self) -> u16 {
        self.containers_advanced
    }

    pub fn advance(&mut self) -> Advance {
        self.row += 1;
        if self.row < CONTAINER_ROWS {
            return Advance::Row;
        }

        self.row = 0;
        self.column += 1;
        if self.column < CONTAINER_COLUMNS {
            return Advance::Column;
        }

        self.column = 0;
        self.containers_advanced = self.containers_advanced.saturating_add(1);
        Advance::Container
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_row_wraps_into_next_column() {
        let mut tracker = PositionTracker::new();
        for row in 1..CONTAINER_ROWS {
            assert_eq!(tracker.advance(), Advance::Row);
            assert_eq!(tracker.row(), row);
        }

        assert_eq!(tracker.advance(), Advance::Column);
        assert_eq!((tracker.row(), tracker.column()), (0, 1));
        assert_eq!(tracker.containers_advanced(), 0);
    }

    #[test]
    fn test_full_container_advances_once() {
        let mut tracker = PositionTracker::new();
        let advances = (0..CONTAINER_SLOTS)
            .filter(|_| tracker.advance() == Advance::Container)
            .count();

        assert_eq!(advances, 1);
        assert_eq!(tracker, PositionTracker { row: 0, column: 0, containers_advanced: 1 });
    }

    #[test]
    fn test_column_changes_every_five_advances() {
        let mut tracker = PositionTracker::new();
        let columns = (0..CONTAINER_SLOTS * 2)
            .filter(|_| tracker.advance() != Advance::Row)
            .count();

        assert_eq!(columns, 12);
        assert_eq!(tracker.containers_advanced(), 2);
    }
}
