//! Screen and suggestion cursor

/// Data screens, in rotation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Temperature and humidity
    #[default]
    Primary,
    /// Moisture status and rainfall
    Secondary,
    /// Best crop and scrolling alternatives
    Prediction,
}

impl Screen {
    /// Number of screens in the rotation
    pub const COUNT: usize = 3;

    /// Screen at `index`, wrapping modulo [`Screen::COUNT`]
    pub const fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => Self::Primary,
            1 => Self::Secondary,
            _ => Self::Prediction,
        }
    }

    /// Position in the rotation
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Next screen in the rotation
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Active screen and highlighted suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollCursor {
    /// Screen being shown
    pub screen: Screen,
    /// Index of the suggestion being shown
    pub suggestion: usize,
}

impl ScrollCursor {
    /// Move to the next screen
    pub fn advance_screen(&mut self) {
        self.screen = self.screen.next();
    }

    /// Move to the next of `len` suggestions
    ///
    /// Does nothing when `len` is zero.
    pub fn advance_suggestion(&mut self, len: usize) {
        if len > 0 {
            self.suggestion = (self.suggestion + 1) % len;
        }
    }

    /// Suggestion index to display for a list of `len`
    ///
    /// The list may have shrunk since the cursor last moved.
    pub fn suggestion_for(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.suggestion % len)
        }
    }
}
