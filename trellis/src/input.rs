//! Input normalization: key tokens and pointer kinds.

/// Normalized key token consumed by the flavor key maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Enter,
    Space,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    /// A single printable character (the character itself travels in [`KeyPress`]).
    Character,
    Tab,
    Asterisk,
}

/// A normalized key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The normalized token.
    pub token: KeyToken,
    /// The typed character, for [`KeyToken::Character`].
    pub character: Option<char>,
}

impl KeyPress {
    /// Create a key press without a character.
    pub const fn new(token: KeyToken) -> Self {
        Self {
            token,
            character: None,
        }
    }

    /// Create a character key press.
    pub const fn character(c: char) -> Self {
        Self {
            token: KeyToken::Character,
            character: Some(c),
        }
    }

    /// Normalize a DOM-style key name (`"Enter"`, `" "`, `"ArrowUp"`, `"a"`...).
    ///
    /// Returns `None` for keys the menus don't react to.
    pub fn from_key(key: &str) -> Option<Self> {
        let token = match key {
            "Enter" => KeyToken::Enter,
            " " | "Spacebar" => KeyToken::Space,
            "Escape" | "Esc" => KeyToken::Escape,
            "ArrowUp" | "Up" => KeyToken::ArrowUp,
            "ArrowDown" | "Down" => KeyToken::ArrowDown,
            "ArrowLeft" | "Left" => KeyToken::ArrowLeft,
            "ArrowRight" | "Right" => KeyToken::ArrowRight,
            "Home" => KeyToken::Home,
            "End" => KeyToken::End,
            "Tab" => KeyToken::Tab,
            "*" => KeyToken::Asterisk,
            other => {
                let mut chars = other.chars();
                let c = chars.next()?;
                if chars.next().is_some() || c.is_whitespace() || c.is_control() {
                    return None;
                }
                return Some(Self::character(c));
            }
        };
        Some(Self::new(token))
    }
}

/// The device a pointer event came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}
