//! Biography markup rendering.

/// Rendering width for plain-text output. Wide enough that realistic
/// biographies come out unwrapped.
const RENDER_WIDTH: usize = 10_000;

/// Render biography HTML to plain text.
///
/// Pure utility with no state. Trailing whitespace introduced by block
/// elements is stripped. Errors are returned to the caller; the joiner
/// degrades them to an empty description rather than failing the build.
pub fn html_to_plain(markup: &str) -> Result<String, html2text::Error> {
    let rendered = html2text::config::plain().string_from_read(markup.as_bytes(), RENDER_WIDTH)?;
    Ok(rendered.trim_end().to_string())
}
