/// A key event as decoded by the terminal front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// A byte to insert at the cursor (tabs included).
    Byte(u8),
    Enter,
    /// Deletes the byte before the cursor.
    Backspace,
    /// Deletes the byte under the cursor.
    Delete,
    Arrow(editor_core::enums::Direction),
    Home,
    End,
    PageUp,
    PageDown,
    Undo,
    Redo,
    Quit,
    /// Recognised but not implemented: there is no save path.
    Save,
    ModeToggle,
}

/// Whether `w a s d` move the cursor or type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Navigate,
    Insert,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Mode::Navigate => Mode::Insert,
            Mode::Insert => Mode::Navigate,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Navigate => write!(f, "NAVIGATE"),
            Mode::Insert => write!(f, "INSERT"),
        }
    }
}
