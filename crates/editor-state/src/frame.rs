/// What the terminal front end paints for one refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Tab-expanded text of each document row in the viewport, top to
    /// bottom. Shorter than the viewport when the document ends early.
    pub lines: Vec<String>,
    /// Screen row of the cursor within the viewport.
    pub cursor_row: usize,
    /// Screen column of the cursor after tab expansion.
    pub cursor_column: usize,
    /// Rows of the text area.
    pub height: usize,
    pub width: usize,
    pub status: Option<String>,
    /// Set only while the document is empty.
    pub welcome: Option<String>,
}

/// Expands each tab to `tab_stop` spaces and cuts the result at `width`
/// bytes.
#[must_use]
pub fn expand_line(line: &[u8], tab_stop: usize, width: usize) -> String {
    let mut out = Vec::with_capacity(line.len().min(width));

    for &byte in line {
        if out.len() >= width {
            break;
        }

        if byte == b'\t' {
            out.extend(std::iter::repeat_n(b' ', tab_stop));
        } else {
            out.push(byte);
        }
    }

    out.truncate(width);

    String::from_utf8_lossy(&out).into_owned()
}

#[must_use]
pub fn welcome_message() -> String {
    format!("Patchwork editor -- version {}", env!("CARGO_PKG_VERSION"))
}
