use std::io::{BufWriter, Stdout, Write};

use crossterm::{cursor, execute, queue, style, terminal};

/// Owns the terminal while the editor runs: raw mode and the alternate
/// screen are entered on creation and left on drop.
pub struct Screen {
    out: BufWriter<Stdout>,
}

impl Screen {
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be
    /// entered.
    pub fn new() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = std::io::stdout();

        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All)
        )?;

        Ok(Self {
            out: BufWriter::new(stdout),
        })
    }

    /// Current size as `(width, height)`, 80x24 when it cannot be queried.
    #[must_use]
    pub fn size() -> (usize, usize) {
        terminal::size().map_or((80, 24), |(w, h)| (usize::from(w), usize::from(h)))
    }

    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn paint(&mut self, frame: &editor_state::frame::Frame) -> anyhow::Result<()> {
        draw(&mut self.out, frame)?;
        self.out.flush()?;

        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.out.flush();

        restore();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once,
/// and from a panic hook.
pub fn restore() {
    if terminal::disable_raw_mode().is_err() {
        log::error!("failed to disable raw mode");
    }

    let mut stdout = std::io::stdout();

    if execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show).is_err() {
        log::error!("failed to restore screen");
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Writes `frame` to `out` as crossterm commands. Rows past the end of the
/// document show `~`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn draw(out: &mut impl Write, frame: &editor_state::frame::Frame) -> anyhow::Result<()> {
    queue!(out, cursor::Hide)?;

    for y in 0..frame.height {
        queue!(
            out,
            cursor::MoveTo(0, to_u16(y)),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;

        match frame.lines.get(y) {
            Some(line) if frame.welcome.is_none() => write!(out, "{line}")?,
            _ => {
                write!(out, "~")?;

                if let Some(welcome) = frame.welcome.as_ref().filter(|_| y == frame.height / 3) {
                    let text: String = welcome.chars().take(frame.width.saturating_sub(1)).collect();
                    let padding = frame.width.saturating_sub(text.len()) / 2;

                    write!(out, "{}{text}", " ".repeat(padding.saturating_sub(1)))?;
                }
            }
        }
    }

    if let Some(status) = &frame.status {
        let text: String = status.chars().take(frame.width).collect();

        queue!(
            out,
            cursor::MoveTo(0, to_u16(frame.height)),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::SetAttribute(style::Attribute::Reverse),
            style::Print(format!("{text:<width$}", width = frame.width)),
            style::SetAttribute(style::Attribute::Reset)
        )?;
    }

    queue!(
        out,
        cursor::MoveTo(to_u16(frame.cursor_column), to_u16(frame.cursor_row)),
        cursor::Show
    )?;

    Ok(())
}
