use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use editor_core::enums::Direction;
use editor_state::key::{KeyEvent, Mode};

/// What one poll of the terminal produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Keys(Vec<KeyEvent>),
    Resize { width: usize, height: usize },
}

/// Waits up to `timeout` for one terminal event. `None` means nothing
/// arrived, or the event has no meaning for the editor.
///
/// # Errors
///
/// Returns an error if reading from the terminal fails.
pub fn next_input(timeout: std::time::Duration, mode: Mode) -> anyhow::Result<Option<Input>> {
    if !crossterm::event::poll(timeout)? {
        return Ok(None);
    }

    let input = match crossterm::event::read()? {
        crossterm::event::Event::Key(key) => {
            let keys = decode(key, mode);

            if keys.is_empty() {
                log::debug!("unmapped key {key:?}");

                return Ok(None);
            }

            Input::Keys(keys)
        }
        crossterm::event::Event::Resize(width, height) => Input::Resize {
            width: usize::from(width),
            height: usize::from(height),
        },
        _ => return Ok(None),
    };

    Ok(Some(input))
}

/// Decodes a crossterm key into editor keys.
///
/// A non-ASCII character decodes to one [`KeyEvent::Byte`] per byte of its
/// UTF-8 encoding. Key releases and unknown keys decode to nothing.
#[must_use]
pub fn decode(key: crossterm::event::KeyEvent, mode: Mode) -> Vec<KeyEvent> {
    if key.kind == KeyEventKind::Release {
        return Vec::new();
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let event = match key.code {
            KeyCode::Char('c') => Some(KeyEvent::Quit),
            KeyCode::Char('s') => Some(KeyEvent::Save),
            KeyCode::Char('z') => Some(KeyEvent::Undo),
            KeyCode::Char('y') => Some(KeyEvent::Redo),
            KeyCode::Char('l') => Some(KeyEvent::ModeToggle),
            KeyCode::Char('h') => Some(KeyEvent::Backspace),
            _ => None,
        };

        return event.into_iter().collect();
    }

    let event = match key.code {
        KeyCode::Esc => KeyEvent::ModeToggle,
        KeyCode::Enter => KeyEvent::Enter,
        KeyCode::Tab => KeyEvent::Byte(b'\t'),
        KeyCode::Backspace => KeyEvent::Backspace,
        KeyCode::Delete => KeyEvent::Delete,
        KeyCode::Left => KeyEvent::Arrow(Direction::Left),
        KeyCode::Right => KeyEvent::Arrow(Direction::Right),
        KeyCode::Up => KeyEvent::Arrow(Direction::Up),
        KeyCode::Down => KeyEvent::Arrow(Direction::Down),
        KeyCode::Home => KeyEvent::Home,
        KeyCode::End => KeyEvent::End,
        KeyCode::PageUp => KeyEvent::PageUp,
        KeyCode::PageDown => KeyEvent::PageDown,
        KeyCode::Char(c) => {
            if let Some(direction) = navigation(c).filter(|_| mode == Mode::Navigate) {
                return vec![KeyEvent::Arrow(direction)];
            }

            let mut utf8 = [0; 4];

            return c
                .encode_utf8(&mut utf8)
                .bytes()
                .map(KeyEvent::Byte)
                .collect();
        }
        _ => return Vec::new(),
    };

    vec![event]
}

fn navigation(c: char) -> Option<Direction> {
    match c {
        'w' => Some(Direction::Up),
        'a' => Some(Direction::Left),
        's' => Some(Direction::Down),
        'd' => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod input_tests {
    use super::*;
    use crossterm::event::KeyEvent as TermKey;

    fn plain(code: KeyCode) -> TermKey {
        TermKey::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> TermKey {
        TermKey::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn control_keys() {
        assert_eq!(decode(ctrl('c'), Mode::Insert), vec![KeyEvent::Quit]);
        assert_eq!(decode(ctrl('s'), Mode::Insert), vec![KeyEvent::Save]);
        assert_eq!(decode(ctrl('z'), Mode::Insert), vec![KeyEvent::Undo]);
        assert_eq!(decode(ctrl('y'), Mode::Insert), vec![KeyEvent::Redo]);
        assert_eq!(decode(ctrl('l'), Mode::Navigate), vec![KeyEvent::ModeToggle]);
        assert_eq!(decode(ctrl('h'), Mode::Insert), vec![KeyEvent::Backspace]);
        assert!(decode(ctrl('q'), Mode::Insert).is_empty());
    }

    #[test]
    fn wasd_depends_on_mode() {
        let w = plain(KeyCode::Char('w'));

        assert_eq!(
            decode(w, Mode::Navigate),
            vec![KeyEvent::Arrow(Direction::Up)]
        );
        assert_eq!(decode(w, Mode::Insert), vec![KeyEvent::Byte(b'w')]);
        assert_eq!(
            decode(plain(KeyCode::Char('x')), Mode::Navigate),
            vec![KeyEvent::Byte(b'x')]
        );
    }

    #[test]
    fn special_keys() {
        assert_eq!(decode(plain(KeyCode::Tab), Mode::Insert), vec![KeyEvent::Byte(b'\t')]);
        assert_eq!(decode(plain(KeyCode::Enter), Mode::Insert), vec![KeyEvent::Enter]);
        assert_eq!(decode(plain(KeyCode::Esc), Mode::Insert), vec![KeyEvent::ModeToggle]);
        assert_eq!(decode(plain(KeyCode::Delete), Mode::Insert), vec![KeyEvent::Delete]);
        assert_eq!(decode(plain(KeyCode::PageDown), Mode::Insert), vec![KeyEvent::PageDown]);
        assert!(decode(plain(KeyCode::F(1)), Mode::Insert).is_empty());
    }

    #[test]
    fn non_ascii_decodes_to_utf8_bytes() {
        assert_eq!(
            decode(plain(KeyCode::Char('é')), Mode::Insert),
            vec![KeyEvent::Byte(0xc3), KeyEvent::Byte(0xa9)]
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = plain(KeyCode::Char('a'));

        key.kind = KeyEventKind::Release;

        assert!(decode(key, Mode::Insert).is_empty());
    }
}
