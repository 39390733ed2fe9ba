use crate::core::constants::MAX_RATING;

/// Five-star rating control for a saved listing.
///
/// Hovering previews a value without persisting it; clicking commits the
/// value and hands it back so the caller can store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StarRating {
    committed: u8,
    preview: Option<u8>,
}

impl StarRating {
    /// `committed` is clamped to 0..=5, 0 meaning unrated
    pub fn new(committed: u8) -> Self {
        Self {
            committed: committed.min(MAX_RATING),
            preview: None,
        }
    }

    pub fn committed(&self) -> u8 {
        self.committed
    }

    /// The value currently highlighted
    pub fn displayed(&self) -> u8 {
        self.preview.unwrap_or(self.committed)
    }

    pub fn hover(&mut self, star: u8) {
        if (1..=MAX_RATING).contains(&star) {
            self.preview = Some(star);
        }
    }

    pub fn leave(&mut self) {
        self.preview = None;
    }

    /// Commit `star`; returns the value to persist, or `None` for an out-of-range star
    pub fn click(&mut self, star: u8) -> Option<u8> {
        if !(1..=MAX_RATING).contains(&star) {
            return None;
        }
        self.committed = star;
        self.preview = None;
        Some(star)
    }

    /// Lit flags for stars 1 through 5
    pub fn stars(&self) -> [bool; MAX_RATING as usize] {
        let shown = self.displayed();
        let mut lit = [false; MAX_RATING as usize];
        for (index, star) in lit.iter_mut().enumerate() {
            *star = (index as u8) < shown;
        }
        lit
    }
}
