use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use jot_core::{Editor, Mode, Viewport, gutter_width};

/// Styles for the three screen regions. Pure configuration; build one
/// and hand it to [`render`].
pub struct Theme {
    pub text: Style,
    pub gutter: Style,
    pub status_bar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Style::default().bg(Color::Rgb(50, 50, 50)).fg(Color::White),
            gutter: Style::default().bg(Color::Rgb(40, 40, 40)).fg(Color::White),
            status_bar: Style::default().bg(Color::White).fg(Color::Rgb(50, 50, 50)),
        }
    }
}

/// Redraw the whole screen: status rows, gutter, text, cursor.
///
/// Nudges the viewport first so the cursor's cell is on screen, then
/// maps the visible buffer rectangle onto the text area.
pub fn render(
    frame: &mut Frame,
    editor: &Editor,
    viewport: &mut Viewport,
    theme: &Theme,
    file_name: &str,
) {
    let [top_area, content_area, bottom_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let gutter = (gutter_width(editor.buffer.line_count()) as u16).min(content_area.width);
    let [gutter_area, text_area] =
        Layout::horizontal([Constraint::Length(gutter), Constraint::Min(1)]).areas(content_area);

    viewport.scroll_to_cursor(
        editor.cursor,
        text_area.width as usize,
        text_area.height as usize,
    );

    render_status_top(frame, top_area, editor, theme, file_name);
    render_gutter(frame, gutter_area, editor, viewport, theme);
    render_text(frame, text_area, editor, viewport, theme);
    render_status_bottom(frame, bottom_area, editor, theme);

    let cx = text_area.x + (editor.cursor.x - viewport.offset_x) as u16;
    let cy = text_area.y + (editor.cursor.y - viewport.offset_y) as u16;
    if cx < text_area.x + text_area.width && cy < text_area.y + text_area.height {
        frame.set_cursor_position((cx, cy));
    }
}

/// Top row: file name, starred while there are unpersisted edits.
fn render_status_top(
    frame: &mut Frame,
    area: Rect,
    editor: &Editor,
    theme: &Theme,
    file_name: &str,
) {
    let marker = if editor.unsaved { "*" } else { "" };
    let bar = Paragraph::new(Line::from(format!(" {file_name}{marker}"))).style(theme.status_bar);
    frame.render_widget(bar, area);
}

/// Right-aligned 1-based line numbers; rows past the end of the buffer
/// stay blank.
fn render_gutter(
    frame: &mut Frame,
    area: Rect,
    editor: &Editor,
    viewport: &Viewport,
    theme: &Theme,
) {
    let width = area.width as usize;
    let rows = viewport.visible_rows(editor.buffer.line_count(), area.height as usize);
    let lines: Vec<Line> = rows
        .map(|row| Line::from(format!("{:>w$} ", row + 1, w = width.saturating_sub(1))))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(theme.gutter), area);
}

fn render_text(frame: &mut Frame, area: Rect, editor: &Editor, viewport: &Viewport, theme: &Theme) {
    let rows = viewport.visible_rows(editor.buffer.line_count(), area.height as usize);
    let lines: Vec<Line> = rows
        .map(|row| {
            let line = editor.buffer.line(row);
            let cols = viewport.visible_cols(line.len(), area.width as usize);
            Line::from(line[cols].iter().collect::<String>())
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).style(theme.text), area);
}

/// Bottom row: 1-based cursor position on the left, mode-dependent key
/// hints on the right.
fn render_status_bottom(frame: &mut Frame, area: Rect, editor: &Editor, theme: &Theme) {
    let position = format!(" ({},{})", editor.cursor.x + 1, editor.cursor.y + 1);
    let hint = match &editor.mode {
        Mode::Insert => "^F Find, ^Z Undo, ^S Save, ^Q Quit".to_string(),
        Mode::ConfirmExit => "EXIT: Save changes? [y/n] | Esc Back".to_string(),
        Mode::Find { query } => {
            format!("FIND: \"{}\" | Esc Back", query.iter().collect::<String>())
        }
    };
    let pad = (area.width as usize).saturating_sub(position.width() + hint.width() + 1);
    let bar = Paragraph::new(Line::from(vec![
        Span::raw(position),
        Span::raw(" ".repeat(pad)),
        Span::raw(hint),
        Span::raw(" "),
    ]))
    .style(theme.status_bar);
    frame.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_core::Cursor;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(editor: &Editor, viewport: &mut Viewport) -> Terminal<TestBackend> {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| render(frame, editor, viewport, &theme, "notes.txt"))
            .unwrap();
        terminal
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_text_numbers_and_status() {
        let editor = Editor::from_text("hello\nworld");
        let mut viewport = Viewport::default();
        let terminal = draw(&editor, &mut viewport);
        let content = screen_text(&terminal);
        assert!(content.contains("hello"));
        assert!(content.contains("world"));
        assert!(content.contains("notes.txt"));
        assert!(!content.contains("notes.txt*"));
        assert!(content.contains("(1,1)"));
        assert!(content.contains("^F Find, ^Z Undo, ^S Save, ^Q Quit"));
    }

    #[test]
    fn test_render_stars_unsaved_file() {
        let mut editor = Editor::from_text("hello");
        editor.unsaved = true;
        let mut viewport = Viewport::default();
        let terminal = draw(&editor, &mut viewport);
        assert!(screen_text(&terminal).contains("notes.txt*"));
    }

    #[test]
    fn test_render_scrolls_to_keep_cursor_visible() {
        let text = (1..=30)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut editor = Editor::from_text(&text);
        editor.cursor = Cursor { x: 0, y: 29 };
        let mut viewport = Viewport::default();
        let terminal = draw(&editor, &mut viewport);
        // 8 text rows below the top status bar
        assert_eq!(viewport.offset_y, 22);
        let content = screen_text(&terminal);
        assert!(content.contains("line 30"));
        assert!(!content.contains("line 22"));
    }

    #[test]
    fn test_render_find_status_shows_query() {
        let mut editor = Editor::from_text("hello");
        editor.mode = Mode::Find {
            query: vec!['h', 'i'],
        };
        let mut viewport = Viewport::default();
        let terminal = draw(&editor, &mut viewport);
        assert!(screen_text(&terminal).contains("FIND: \"hi\" | Esc Back"));
    }
}
