//! jot - a tiny terminal text editor.
//!
//! Opens one file, edits it in place, and writes it back on `^S`. The
//! engine lives in `jot-core`; this crate owns the terminal, the
//! renderer, and the flat-file storage.

mod storage;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use jot_core::{Editor, EditorAction, Input, TextBuffer, Viewport, map_key};

use storage::FileStore;
use ui::Theme;

/// A tiny terminal text editor
#[derive(Parser, Debug)]
#[command(name = "jot", version, about, long_about = None)]
struct Cli {
    /// File to edit; created on the first save if it does not exist
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Load before touching the terminal so a read failure prints normally.
    // Missing and empty files both start as a fresh unsaved buffer.
    let mut editor = match storage::load_lines(&cli.file)? {
        Some(lines) if !lines.is_empty() => Editor::new(TextBuffer::from_lines(lines), false),
        _ => Editor::new(TextBuffer::new(), true),
    };
    let mut store = FileStore::new(cli.file.clone());
    let file_name = cli.file.display().to_string();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut editor, &mut store, &file_name);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    editor: &mut Editor,
    store: &mut FileStore,
    file_name: &str,
) -> Result<()> {
    let mut viewport = Viewport::default();
    let theme = Theme::default();

    loop {
        terminal.draw(|frame| ui::render(frame, editor, &mut viewport, &theme, file_name))?;

        let input = match event::read()? {
            Event::Key(key) => match map_key(key) {
                Some(input) => input,
                None => continue,
            },
            Event::Resize(_, _) => Input::ScreenResized,
            _ => continue,
        };

        if editor.apply(input, store)? == EditorAction::Exit {
            return Ok(());
        }
    }
}
