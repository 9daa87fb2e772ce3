mod render;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use marknote_config::Config;
use marknote_engine::{ParseOptions, Policy, Session, io, parse_document};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

/// Width of thematic breaks in `--print` output.
const PRINT_WIDTH: usize = 60;

struct App {
    session: Session,
    file_list_state: ListState,
    status: String,
}

impl App {
    fn new(notes_path: &Path, options: ParseOptions) -> Result<Self> {
        let mut session = Session::new(options);
        session.open_folder(notes_path)?;

        let mut app = Self {
            session,
            file_list_state: ListState::default(),
            status: String::new(),
        };

        // Select first item if available
        app.with_tree(|tree| tree.select_next());
        app.update_content_for_selection();
        Ok(app)
    }

    fn with_tree(&mut self, f: impl FnOnce(&mut marknote_engine::FileTree)) {
        if let Some(tree) = self.session.file_tree_mut() {
            f(tree);
        }
        self.sync_list_state();
    }

    fn sync_list_state(&mut self) {
        let index = self.session.file_tree().and_then(|tree| tree.selected_index());
        self.file_list_state.select(index);
    }

    fn selected_row(&self) -> Option<marknote_engine::FileTreeItem> {
        let tree = self.session.file_tree()?;
        tree.items().get(tree.selected_index()?).cloned()
    }

    fn report<T>(&mut self, result: Result<T, io::IoError>) {
        match result {
            Ok(_) => self.status.clear(),
            Err(e) => {
                log::warn!("{e}");
                self.status = e.to_string();
            }
        }
    }

    fn next_file(&mut self) {
        self.with_tree(|tree| tree.select_next());
        self.update_content_for_selection();
    }

    fn previous_file(&mut self) {
        self.with_tree(|tree| tree.select_previous());
        self.update_content_for_selection();
    }

    /// Files are opened as soon as they are highlighted.
    fn update_content_for_selection(&mut self) {
        let Some(item) = self.selected_row() else {
            return;
        };
        if item.is_folder {
            return;
        }
        let already_open = self
            .session
            .current_file()
            .is_some_and(|file| file.relative_path() == item.path.as_relative_path());
        if !already_open {
            let result = self.session.load_file(&item.path);
            self.report(result);
        }
        self.sync_list_state();
    }

    fn activate_selected_item(&mut self) {
        let Some(item) = self.selected_row() else {
            return;
        };
        if item.is_folder {
            self.with_tree(|tree| tree.toggle_folder(&item.path));
        } else {
            let result = self.session.load_file(&item.path);
            self.report(result);
            self.sync_list_state();
        }
    }

    fn expand_selected_folder(&mut self) {
        if let Some(item) = self.selected_row()
            && item.is_folder
            && !item.is_expanded
        {
            self.with_tree(|tree| tree.expand_folder(&item.path));
        }
    }

    fn collapse_selected_folder(&mut self) {
        if let Some(item) = self.selected_row()
            && item.is_folder
            && item.is_expanded
        {
            self.with_tree(|tree| tree.collapse_folder(&item.path));
        }
    }

    fn toggle_policy(&mut self) {
        let mut options = *self.session.parse_options();
        options.policy = match options.policy {
            Policy::Structural => Policy::Heuristic,
            Policy::Heuristic => Policy::Structural,
        };
        log::info!("preview policy now {:?}", options.policy);
        self.session.set_parse_options(options);
    }

    fn reload(&mut self) {
        let result = self.session.reload();
        self.report(result);
        self.sync_list_state();
    }
}

fn policy_label(policy: Policy) -> &'static str {
    match policy {
        Policy::Structural => "structural",
        Policy::Heuristic => "heuristic",
    }
}

/// Renders one file to stdout without starting the TUI.
fn print_file(path: &Path, options: &ParseOptions) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = parse_document(&content, options);
    for line in render::render_doc(&doc, PRINT_WIDTH) {
        println!("{}", render::line_text(&line));
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let options = config
        .as_ref()
        .map(|config| config.preview)
        .unwrap_or_default();

    if args.len() == 3 && args[1] == "--print" {
        return print_file(Path::new(&args[2]), &options);
    }

    let notes_path;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided - use it
        notes_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        // No CLI argument - fall back to the config file
        match config {
            Some(config) => {
                notes_path = config.notes_path;
                from_config = true;
            }
            None => {
                eprintln!("Error: No notes path provided and no config file found");
                eprintln!("Usage: {} <notes-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [notes-folder-path]", args[0]);
        eprintln!("       {} --print <file.md>", args[0]);
        process::exit(1);
    };

    if let Err(e) = io::validate_notes_dir(&notes_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Notes path '{}'{} is invalid: {e}",
            notes_path.display(),
            source
        );
        process::exit(1);
    }

    let mut app = App::new(&notes_path, options)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected_item(),
                KeyCode::Right => app.expand_selected_folder(),
                KeyCode::Left => app.collapse_selected_folder(),
                KeyCode::Char('p') => app.toggle_policy(),
                KeyCode::Char('r') => app.reload(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    // File list panel
    let file_items: Vec<ListItem> = app
        .session
        .file_tree()
        .map(|tree| tree.items())
        .unwrap_or_default()
        .iter()
        .map(|item| {
            let indent = "  ".repeat(item.depth);
            let icon = if item.is_folder {
                if item.is_expanded { "📂 " } else { "📁 " }
            } else {
                "📄 "
            };
            ListItem::new(Line::from(format!("{indent}{icon}{}", item.name)))
        })
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Files"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Preview panel
    let inner_width = usize::from(chunks[1].width.saturating_sub(2));
    let doc = app.session.preview();
    let content_text = if app.session.current_file().is_none() {
        vec![Line::from("Select a file to view its content")]
    } else if doc.is_empty() {
        vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        render::render_doc(&doc, inner_width)
    };

    let title = format!(
        "{} [{}]",
        app.session.title(),
        policy_label(app.session.parse_options().policy)
    );
    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Status line, or key help when there is nothing to report
    let bottom = if app.status.is_empty() {
        Line::from(vec![
            Span::raw("q: Quit | ↑/k ↓/j: Move | Enter/Space: Open/Toggle | "),
            Span::raw("→/←: Expand/Collapse | p: Policy | r: Reload"),
        ])
    } else {
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Red),
        ))
    };

    f.render_widget(Paragraph::new(bottom), rows[1]);
}
