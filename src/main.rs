use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};

use quizr::app::{App, AppScreen};
use quizr::config::Config;
use quizr::event::{AppEvent, EventHandler};
use quizr::logging;
use quizr::quiz::catalog::Catalog;
use quizr::quiz::markup::to_plain_text;
use quizr::quiz::progress::ProgressTracker;
use quizr::store::KeyValueStore;
use quizr::store::json_store::JsonFileStore;
use quizr::store::memory::MemoryStore;
use quizr::ui::components::choice_list::ChoiceList;
use quizr::ui::components::completion::Completion;
use quizr::ui::components::confirm_dialog::ConfirmDialog;
use quizr::ui::components::feedback::Feedback;
use quizr::ui::components::progress_bar::ProgressBar;
use quizr::ui::components::text_panel::TextPanel;
use quizr::ui::layout::{
    AppLayout, LayoutTier, centered_rect, pack_hint_lines, split_passage, wrapped_line_count,
};
use quizr::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "quizr", version, about = "Terminal multiple-choice quiz player")]
struct Cli {
    #[arg(short, long, help = "JSON question catalog (defaults to the bundled sample)")]
    catalog: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Directory for saved progress and the log file")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Keep answer choices in catalog order")]
    no_shuffle: bool,

    #[arg(long, help = "Keep progress in memory only")]
    ephemeral: bool,

    #[arg(long, help = "Clear saved progress and exit")]
    reset: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if cli.no_shuffle {
        config.shuffle_choices = false;
    }

    // Ephemeral runs leave nothing on disk, the log included
    if !cli.ephemeral
        && let Err(e) = logging::init(&config.data_dir)
    {
        eprintln!("warning: logging disabled: {e:#}");
    }
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring unreadable config file");
    }

    let store: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let store = JsonFileStore::with_base_dir(config.data_dir.clone())
            .with_context(|| format!("cannot open data dir {}", config.data_dir.display()))?;
        if store.clean_stale_tmp() {
            warn!("removed leftovers of an interrupted save");
        }
        Box::new(store)
    };
    let tracker = ProgressTracker::new(store);

    if cli.reset {
        tracker.reset()?;
        println!("Progress cleared.");
        return Ok(());
    }

    // Nothing to quiz on: report and stop before touching the terminal
    let catalog = Catalog::load(config.catalog_path.as_deref())
        .context("no usable question catalog")?;
    info!(questions = catalog.len(), "catalog loaded");

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!(theme = %config.theme, available = ?Theme::available_themes(), "unknown theme");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let mut app = App::new(
        &catalog,
        tracker,
        theme,
        config.shuffle_choices,
        SmallRng::from_entropy(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<'_, S>,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key<S: KeyValueStore>(app: &mut App<'_, S>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Confirmation dialog takes priority
    if app.confirm_reset {
        match key.code {
            KeyCode::Char('y') => app.confirm_reset(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_reset(),
            _ => {}
        }
        return;
    }

    match app.screen {
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Complete => handle_complete_key(app, key),
    }
}

fn handle_quiz_key<S: KeyValueStore>(app: &mut App<'_, S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(ch @ '1'..='4') => {
            let index = ch as usize - '1' as usize;
            app.selected = index;
            app.answer(index);
        }
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.is_answered() {
                app.advance();
            } else {
                app.answer_selected();
            }
        }
        KeyCode::Char('n') | KeyCode::Right => app.advance(),
        KeyCode::Char('r') => app.request_reset(),
        _ => {}
    }
}

fn handle_complete_key<S: KeyValueStore>(app: &mut App<'_, S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.restart(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn render<S: KeyValueStore>(frame: &mut ratatui::Frame, app: &App<'_, S>) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Complete => render_complete(frame, app),
    }

    if app.confirm_reset {
        let popup = centered_rect(40, 25, area);
        frame.render_widget(ConfirmDialog::new("Reset all progress?", app.theme), popup);
    }
}

fn render_header<S: KeyValueStore>(
    frame: &mut ratatui::Frame,
    app: &App<'_, S>,
    layout: &AppLayout,
) {
    let colors = &app.theme.colors;

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " quizr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} questions", app.total()),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let progress = ProgressBar::new(app.solved_count(), app.total(), app.theme);
    frame.render_widget(progress, layout.progress);
}

fn render_quiz<S: KeyValueStore>(frame: &mut ratatui::Frame, app: &App<'_, S>) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = AppLayout::new(area);
    render_header(frame, app, &layout);

    let Some(round) = app.round.as_ref() else {
        return;
    };
    let question = round.question;

    let passage = question.passage().map(to_plain_text);
    let body_area = match &passage {
        Some(text) => {
            let width = match layout.tier {
                LayoutTier::Wide => (u32::from(layout.main.width) * 45 / 100) as u16,
                LayoutTier::Narrow => layout.main.width,
            };
            let lines = wrapped_line_count(text, width.saturating_sub(2) as usize);
            let (passage_area, rest) = split_passage(layout.main, layout.tier, lines);
            frame.render_widget(TextPanel::new("Passage", text, app.theme), passage_area);
            rest
        }
        None => layout.main,
    };

    let question_lines =
        wrapped_line_count(&question.question, body_area.width.saturating_sub(2) as usize);
    let mut constraints = vec![
        Constraint::Length((question_lines as u16).saturating_add(2)),
        Constraint::Length(10),
    ];
    if round.is_answered() {
        constraints.push(Constraint::Min(4));
    } else {
        constraints.push(Constraint::Min(0));
    }
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(body_area);

    let title = format!("Q{}", app.question_number);
    frame.render_widget(
        TextPanel::new(title, &question.question, app.theme).emphasized(true),
        sections[0],
    );
    frame.render_widget(
        ChoiceList::new(&round.choices, app.selected, round.outcome, app.theme),
        sections[1],
    );

    let explanation = to_plain_text(&question.explanation);
    if let Some(outcome) = round.outcome {
        frame.render_widget(Feedback::new(outcome, &explanation, app.theme), sections[2]);
    }

    let hints: &[&str] = if round.is_answered() {
        &["[n/Enter] Next", "[r] Reset", "[q] Quit"]
    } else {
        &["[1-4] Answer", "[↑↓/Enter] Select", "[r] Reset", "[q] Quit"]
    };
    let footer_text = pack_hint_lines(hints, layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        footer_text,
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_complete<S: KeyValueStore>(frame: &mut ratatui::Frame, app: &App<'_, S>) {
    let area = frame.area();
    let layout = AppLayout::new(area);
    render_header(frame, app, &layout);

    let centered = centered_rect(50, 50, layout.main);
    frame.render_widget(Completion::new(app.total(), app.theme), centered);
}
