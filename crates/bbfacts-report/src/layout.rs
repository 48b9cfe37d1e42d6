//! Vertical layout cursor.

/// Running y position of a label. Every element is placed by advancing first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutCursor {
    y: u32,
}

impl LayoutCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move down by `offset` and return the new position.
    pub fn advance(&mut self, offset: u32) -> u32 {
        self.y += offset;
        self.y
    }

    pub fn y(&self) -> u32 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut cursor = LayoutCursor::new();
        assert_eq!(cursor.advance(65), 65);
        assert_eq!(cursor.advance(10), 75);
        assert_eq!(cursor.y(), 75);
    }
}
