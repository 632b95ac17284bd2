use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};

use celldom::{Arrow, Event, Key, KeyEvent};

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_key_from_name_accepts_both_escape_spellings() {
    assert_eq!(Key::from_name("Escape"), Some(Key::Escape));
    assert_eq!(Key::from_name("Esc"), Some(Key::Escape));
    assert_eq!(Key::from_name("a"), Some(Key::Char('a')));
    assert_eq!(Key::from_name("F5"), Some(Key::F(5)));
    assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Arrow(Arrow::Left)));
    assert_eq!(Key::from_name("Unidentified"), None);
    assert_eq!(Key::from_name("MediaPlayPause"), Some(Key::Other));
}

#[test]
fn test_key_display_uses_dom_names() {
    assert_eq!(Key::Escape.to_string(), "Escape");
    assert_eq!(Key::Arrow(Arrow::Up).to_string(), "ArrowUp");
    assert_eq!(Key::F(12).to_string(), "F12");
    assert_eq!(Key::Other.to_string(), "Unidentified");
}

#[test]
fn test_prevent_default_sticks() {
    let mut event = KeyEvent::new(Key::Escape);
    assert!(!event.default_prevented());
    event.prevent_default();
    assert!(event.default_prevented());
}

// ============================================================================
// Crossterm Conversion
// ============================================================================

#[test]
fn test_from_crossterm_key_press() {
    let raw = CtEvent::Key(CtKeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT));
    match Event::from_crossterm(&raw) {
        Some(Event::Key(key)) => {
            assert_eq!(key.key, Key::Escape);
            assert!(key.modifiers.shift);
            assert!(!key.default_prevented());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_unsupported_key_codes_become_other() {
    assert_eq!(Key::from(KeyCode::CapsLock), Key::Other);
    assert_eq!(Key::from(KeyCode::BackTab), Key::Tab);
    assert!(Key::from(KeyCode::Esc).is_escape());
}

#[test]
fn test_from_crossterm_ignores_key_release() {
    let mut release = CtKeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    assert_eq!(Event::from_crossterm(&CtEvent::Key(release)), None);
}

#[test]
fn test_from_crossterm_mouse() {
    let moved = CtEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column: 3,
        row: 4,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(
        Event::from_crossterm(&moved),
        Some(Event::PointerMove { target: None, x: 3, y: 4 })
    );

    let down = CtEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 1,
        row: 2,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(
        Event::from_crossterm(&down),
        Some(Event::Click { target: None, x: 1, y: 2 })
    );
}

#[test]
fn test_from_crossterm_resize_and_focus() {
    assert_eq!(
        Event::from_crossterm(&CtEvent::Resize(120, 40)),
        Some(Event::Resize { width: 120, height: 40 })
    );
    assert_eq!(Event::from_crossterm(&CtEvent::FocusLost), Some(Event::PointerLeave));
    assert_eq!(Event::from_crossterm(&CtEvent::FocusGained), None);
}

#[test]
fn test_event_helpers() {
    assert_eq!(
        Event::click("btn"),
        Event::Click { target: Some("btn".to_string()), x: 0, y: 0 }
    );
    assert!(matches!(Event::key(Key::Escape), Event::Key(k) if k.key == Key::Escape));
}
