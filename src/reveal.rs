//! Masked/revealed display state for sensitive values.
//!
//! Each [`RevealField`] owns the actual value of one sensitive field (Wi-Fi
//! password, hostname, IP). Display code only ever sees what
//! [`RevealField::display`] returns.

/// Character repeated to hide a value.
pub const MASK_CHAR: char = '*';
/// Minimum mask length so short secrets do not leak their length.
pub const MIN_MASK_LEN: usize = 6;
/// Display text for a field with nothing to show.
pub const EMPTY_DISPLAY: &str = "-";

/// Visibility state of a sensitive field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    /// No value loaded; toggling is disabled.
    #[default]
    Empty,
    /// Value loaded and shown as a mask.
    Masked,
    /// Value loaded and shown in clear text.
    Unmasked,
}

/// Per-field reveal state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealField {
    actual: String,
    state: RevealState,
}

impl RevealField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the value after a data refresh.
    ///
    /// A non-empty value always starts masked, even if the previous value was
    /// revealed. An empty value leaves the field `Empty`.
    pub fn load(&mut self, actual: impl Into<String>) {
        self.actual = actual.into();
        self.state = if self.actual.is_empty() {
            RevealState::Empty
        } else {
            RevealState::Masked
        };
    }

    /// Reset after a failed load.
    pub fn fail(&mut self) {
        self.load(String::new());
    }

    /// Flip between masked and unmasked. Returns `false` (no-op) when empty.
    pub fn toggle(&mut self) -> bool {
        self.state = match self.state {
            RevealState::Empty => return false,
            RevealState::Masked => RevealState::Unmasked,
            RevealState::Unmasked => RevealState::Masked,
        };
        true
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn can_toggle(&self) -> bool {
        self.state != RevealState::Empty
    }

    /// Text to render for the current state.
    pub fn display(&self) -> String {
        match self.state {
            RevealState::Empty => EMPTY_DISPLAY.to_string(),
            RevealState::Masked => mask(&self.actual),
            RevealState::Unmasked => self.actual.clone(),
        }
    }

    /// Label for the toggle control.
    pub fn toggle_label(&self) -> &'static str {
        match self.state {
            RevealState::Unmasked => "Hide",
            RevealState::Empty | RevealState::Masked => "Show",
        }
    }

    /// Actual value for explicit user actions such as copying.
    pub fn actual(&self) -> Option<&str> {
        if self.actual.is_empty() {
            None
        } else {
            Some(&self.actual)
        }
    }
}

/// Mask of `max(MIN_MASK_LEN, chars(value))` mask characters.
pub fn mask(value: &str) -> String {
    let len = value.chars().count().max(MIN_MASK_LEN);
    std::iter::repeat(MASK_CHAR).take(len).collect()
}
