use std::fmt;

/// Host events delivered to a component.
///
/// Pointer events carry an optional `target`: DOM-style hosts know the element
/// under the pointer, terminal hosts only know coordinates and leave the
/// target to be resolved by hit testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, delivered at window level.
    Key(KeyEvent),
    /// Primary button activation.
    Click {
        target: Option<String>,
        x: u16,
        y: u16,
    },
    /// Pointer entered or moved over an element.
    PointerMove {
        target: Option<String>,
        x: u16,
        y: u16,
    },
    /// Pointer left the component entirely.
    PointerLeave,
    /// Viewport resized.
    Resize { width: u16, height: u16 },
}

impl Event {
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: Some(target.into()),
            x: 0,
            y: 0,
        }
    }

    pub fn pointer_over(target: impl Into<String>) -> Self {
        Self::PointerMove {
            target: Some(target.into()),
            x: 0,
            y: 0,
        }
    }

    pub fn key(key: Key) -> Self {
        Self::Key(KeyEvent::new(key))
    }

    /// Convert a raw crossterm event. Returns None for events with no
    /// counterpart (key release, focus changes, paste...).
    pub fn from_crossterm(raw: &crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as CtEvent, KeyEventKind, MouseButton, MouseEventKind};

        match raw {
            CtEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Some(Self::Key(KeyEvent {
                    key: key_event.code.into(),
                    modifiers: key_event.modifiers.into(),
                    default_prevented: false,
                }))
            }
            CtEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Self::PointerMove {
                    target: None,
                    x: mouse.column,
                    y: mouse.row,
                }),
                MouseEventKind::Down(MouseButton::Left) => Some(Self::Click {
                    target: None,
                    x: mouse.column,
                    y: mouse.row,
                }),
                _ => None,
            },
            CtEvent::FocusLost => Some(Self::PointerLeave),
            CtEvent::Resize(width, height) => Some(Self::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

/// A key press with a suppressible default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// True once some handler has claimed this key press.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Keys by their DOM `KeyboardEvent.key` meaning. Anything the component
/// never distinguishes is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Arrow(Arrow),
    F(u8),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value. Accepts the legacy `Esc`
    /// spelling alongside `Escape`. None for `Unidentified` and empty names.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "" | "Unidentified" => return None,
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" | "Del" => Self::Delete,
            "ArrowUp" | "Up" => Self::Arrow(Arrow::Up),
            "ArrowDown" | "Down" => Self::Arrow(Arrow::Down),
            "ArrowLeft" | "Left" => Self::Arrow(Arrow::Left),
            "ArrowRight" | "Right" => Self::Arrow(Arrow::Right),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => match name.strip_prefix('F').and_then(|n| n.parse().ok()) {
                        Some(n) => Self::F(n),
                        None => Self::Other,
                    },
                }
            }
        };
        Some(key)
    }

    pub fn is_escape(self) -> bool {
        self == Self::Escape
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Escape => f.write_str("Escape"),
            Self::Enter => f.write_str("Enter"),
            Self::Tab => f.write_str("Tab"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Delete => f.write_str("Delete"),
            Self::Arrow(arrow) => write!(f, "Arrow{arrow:?}"),
            Self::F(n) => write!(f, "F{n}"),
            Self::Other => f.write_str("Unidentified"),
        }
    }
}

/// Modifier keys held during a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Self::Char(c),
            KeyCode::Esc => Self::Escape,
            KeyCode::Enter => Self::Enter,
            KeyCode::Tab | KeyCode::BackTab => Self::Tab,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Up => Self::Arrow(Arrow::Up),
            KeyCode::Down => Self::Arrow(Arrow::Down),
            KeyCode::Left => Self::Arrow(Arrow::Left),
            KeyCode::Right => Self::Arrow(Arrow::Right),
            KeyCode::F(n) => Self::F(n),
            _ => Self::Other,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}
