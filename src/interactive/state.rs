//! Constraint entry form
//!
//! The form is a value: every edit returns a new `ConstraintForm` and the old
//! one stays untouched.

use crate::core::{Constraints, ExclusionSet, Letter, PositionalConstraint, WORD_LENGTH};

/// Number of gray cells offered in the UI
pub const EXCLUDED_MAX: usize = 20;

/// The three rows of input cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Correct,
    WrongSpot,
    Excluded,
}

impl Region {
    pub const ALL: [Self; 3] = [Self::Correct, Self::WrongSpot, Self::Excluded];

    /// Number of cells in the row
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::Correct | Self::WrongSpot => WORD_LENGTH,
            Self::Excluded => EXCLUDED_MAX,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Correct => Self::WrongSpot,
            Self::WrongSpot => Self::Excluded,
            Self::Excluded => Self::Correct,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Correct => Self::Excluded,
            Self::WrongSpot => Self::Correct,
            Self::Excluded => Self::WrongSpot,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Correct => "Correct spots",
            Self::WrongSpot => "Wrong spots",
            Self::Excluded => "Not in word",
        }
    }

    #[must_use]
    pub const fn helper(self) -> &'static str {
        match self {
            Self::Correct => "Letters in the correct positions.",
            Self::WrongSpot => "Letters that are in the word but NOT at these positions.",
            Self::Excluded => "Letters that are not in the word at all.",
        }
    }
}

/// Cursor position inside the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub region: Region,
    pub index: usize,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            region: Region::Correct,
            index: 0,
        }
    }
}

/// Everything the user has typed, plus the cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintForm {
    correct: PositionalConstraint,
    wrong_spots: PositionalConstraint,
    excluded: [Option<Letter>; EXCLUDED_MAX],
    focus: Focus,
}

impl ConstraintForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Letter in a cell, `None` when empty or out of range
    #[must_use]
    pub fn cell(&self, region: Region, index: usize) -> Option<Letter> {
        match region {
            Region::Correct => self.correct.get(index),
            Region::WrongSpot => self.wrong_spots.get(index),
            Region::Excluded => self.excluded.get(index).copied().flatten(),
        }
    }

    /// All cells of a row, in order
    #[must_use]
    pub fn cells(&self, region: Region) -> Vec<Option<Letter>> {
        (0..region.len()).map(|i| self.cell(region, i)).collect()
    }

    /// Return a copy with one cell replaced
    #[must_use]
    pub fn with_cell(&self, region: Region, index: usize, letter: Option<Letter>) -> Self {
        let mut next = self.clone();
        match region {
            Region::Correct => next.correct = self.correct.with(index, letter),
            Region::WrongSpot => next.wrong_spots = self.wrong_spots.with(index, letter),
            Region::Excluded => {
                if let Some(cell) = next.excluded.get_mut(index) {
                    *cell = letter;
                }
            }
        }
        next
    }

    /// Type into the focused cell
    ///
    /// Input is sanitized to a single lowercase letter; with nothing
    /// alphabetic in it the form is returned unchanged. On success the cursor
    /// moves one cell right, stopping at the end of the row.
    #[must_use]
    pub fn with_input(&self, input: &str) -> Self {
        let Some(letter) = Letter::from_input(input) else {
            return self.clone();
        };
        let Focus { region, index } = self.focus;
        self.with_cell(region, index, Some(letter)).moved_right()
    }

    /// Clear the focused cell, or the one before it when already empty
    #[must_use]
    pub fn with_backspace(&self) -> Self {
        let Focus { region, index } = self.focus;
        if self.cell(region, index).is_some() {
            return self.with_cell(region, index, None);
        }
        let moved = self.moved_left();
        let Focus { region, index } = moved.focus;
        moved.with_cell(region, index, None)
    }

    /// Clear the focused cell in place
    #[must_use]
    pub fn with_delete(&self) -> Self {
        let Focus { region, index } = self.focus;
        self.with_cell(region, index, None)
    }

    /// Move the cursor, clamping the index to the target row
    #[must_use]
    pub fn with_focus(&self, region: Region, index: usize) -> Self {
        let mut next = self.clone();
        next.focus = Focus {
            region,
            index: index.min(region.len() - 1),
        };
        next
    }

    #[must_use]
    pub fn moved_left(&self) -> Self {
        let Focus { region, index } = self.focus;
        self.with_focus(region, index.saturating_sub(1))
    }

    #[must_use]
    pub fn moved_right(&self) -> Self {
        let Focus { region, index } = self.focus;
        self.with_focus(region, index + 1)
    }

    #[must_use]
    pub fn next_region(&self) -> Self {
        let Focus { region, index } = self.focus;
        self.with_focus(region.next(), index)
    }

    #[must_use]
    pub fn prev_region(&self) -> Self {
        let Focus { region, index } = self.focus;
        self.with_focus(region.prev(), index)
    }

    /// Empty every cell and reset the cursor
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// True when no cell holds a letter
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correct.is_empty()
            && self.wrong_spots.is_empty()
            && self.excluded.iter().all(Option::is_none)
    }

    /// Same letters in the same cells, ignoring the cursor
    #[must_use]
    pub fn same_cells(&self, other: &Self) -> bool {
        self.correct == other.correct
            && self.wrong_spots == other.wrong_spots
            && self.excluded == other.excluded
    }

    /// Constraints for the filter
    #[must_use]
    pub fn constraints(&self) -> Constraints {
        Constraints::new(
            self.correct,
            self.wrong_spots,
            self.excluded.iter().flatten().copied().collect::<ExclusionSet>(),
        )
    }
}
