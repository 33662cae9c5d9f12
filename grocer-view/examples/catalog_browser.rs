//! Catalog Browser - terminal view over the filter pipeline
//!
//! Run: cargo run -p grocer-view --example catalog_browser
//!
//! Set `DATA_DIR` to browse documents on disk, otherwise `DATA_BASE_URL` is used.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use grocer_view::{CatalogPipeline, Column, Config, RowSet, TableView, build_source};
use ratatui::{prelude::*, widgets::*};
use shared::{Category, Supermarket};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

/// Supermarket chip keys, in `Supermarket::ALL` order
const SUPERMARKET_KEYS: [char; 5] = ['a', 's', 'd', 'f', 'g'];

struct App {
    pipeline: CatalogPipeline,
    rows_rx: watch::Receiver<RowSet>,
    /// Latest published rows
    row_set: RowSet,
    table: TableView,
    logger_state: TuiWidgetState,
}

impl App {
    fn new(pipeline: CatalogPipeline, page_size: u32) -> Self {
        let rows_rx = pipeline.subscribe_rows();
        Self {
            pipeline,
            rows_rx,
            row_set: RowSet::default(),
            table: TableView::new(page_size),
            logger_state: TuiWidgetState::new(),
        }
    }

    /// Pick up a newly published row set, if any
    fn refresh_rows(&mut self) {
        if !self.rows_rx.has_changed().unwrap_or(false) {
            return;
        }
        let row_set = self.rows_rx.borrow_and_update().clone();
        if row_set.generation != self.row_set.generation {
            self.table.reset_page();
            tracing::info!(
                category = ?row_set.filter.category,
                supermarket = ?row_set.filter.supermarket,
                "{} products",
                row_set.len()
            );
        }
        self.row_set = row_set;
    }

    fn columns(&self) -> Vec<Column> {
        let columns: &[Column] = if self.row_set.filter.supermarket.is_none() {
            &Column::DISPLAYED_ALL_SUPERMARKETS
        } else {
            &Column::DISPLAYED
        };
        columns
            .iter()
            .copied()
            .filter(|&c| c != Column::Image)
            .collect()
    }

    /// Returns `false` when the app should quit
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.pipeline.select_category(Category::ALL[index]);
            }
            KeyCode::Char(c) if SUPERMARKET_KEYS.contains(&c) => {
                if let Some(index) = SUPERMARKET_KEYS.iter().position(|&k| k == c) {
                    self.pipeline.select_supermarket(Supermarket::ALL[index]);
                }
            }
            KeyCode::Char('n') => self.table.sort_by(Column::Name),
            KeyCode::Char('p') => self.table.sort_by(Column::Price),
            KeyCode::Char('c') => self.table.sort_by(Column::Subcategory),
            KeyCode::Char('w') => self.table.sort_by(Column::NetWeight),
            KeyCode::Char('m') => self.table.sort_by(Column::Supermarket),
            KeyCode::Char('z') => self.table.cycle_page_size(),
            KeyCode::Right => self.table.next_page(self.row_set.len()),
            KeyCode::Left => self.table.prev_page(),
            KeyCode::PageUp => self.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self.logger_state.transition(TuiWidgetEvent::NextPageKey),
            KeyCode::Up => self.logger_state.transition(TuiWidgetEvent::UpKey),
            KeyCode::Down => self.logger_state.transition(TuiWidgetEvent::DownKey),
            _ => {}
        }
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenv::dotenv() {
        eprintln!("No .env loaded: {e}");
    }
    let config = Config::from_env();

    // Route tracing into the log panel
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},reqwest=warn", config.log_level)));

    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();

    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let source = build_source(&config)?;
    let pipeline =
        CatalogPipeline::spawn(source, config.pipeline_config(), config.initial_filter());
    let mut app = App::new(pipeline, config.page_size);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Keys: 1-5 category, a/s/d/f/g supermarket, n/p/c/w/m sort, ←/→ page, z page size, q quit");

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.pipeline.shutdown().await;

    if let Err(err) = res {
        println!("{:?}", err);
    }
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.refresh_rows();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
            && !app.handle_key(key.code)
        {
            return Ok(());
        }
    }
}

fn chip<'a>(key: String, label: &'a str, selected: bool) -> Vec<Span<'a>> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    vec![
        Span::styled(format!("[{key}]"), Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {label} "), style),
        Span::raw(" "),
    ]
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Chips
            Constraint::Min(5),    // Table
            Constraint::Length(8), // Logs
        ])
        .split(f.area());

    // Filter chips
    let categories: Vec<Span> = Category::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, &c)| {
            chip(
                (i + 1).to_string(),
                c.name(),
                app.pipeline.is_category_selected(c),
            )
        })
        .collect();
    let supermarkets: Vec<Span> = Supermarket::ALL
        .iter()
        .zip(SUPERMARKET_KEYS)
        .flat_map(|(&s, key)| {
            chip(
                key.to_string(),
                s.name(),
                app.pipeline.is_supermarket_selected(s),
            )
        })
        .collect();
    let chips = Paragraph::new(vec![Line::from(categories), Line::from(supermarkets)]).block(
        Block::default()
            .title(" Grocer ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(chips, chunks[0]);

    // Product table
    let columns = app.columns();
    let sort = app.table.sort();
    let header = Row::new(columns.iter().map(|&column| {
        let marker = match sort {
            Some((c, shared::SortDirection::Asc)) if c == column => " ▲",
            Some((c, shared::SortDirection::Desc)) if c == column => " ▼",
            _ => "",
        };
        Cell::from(format!("{}{marker}", column.header()))
    }))
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let page = app.table.page(&app.row_set.rows);
    let rows = page
        .data
        .iter()
        .map(|row| Row::new(columns.iter().map(|c| Cell::from(c.cell(row)))));

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|c| match c {
            Column::Name => Constraint::Percentage(40),
            Column::Price => Constraint::Length(10),
            Column::NetWeight => Constraint::Length(12),
            _ => Constraint::Min(10),
        })
        .collect();

    let pending = app.pipeline.filter() != app.row_set.filter;
    let title = format!(
        " {} products · page {}/{} · {} per page{} ",
        page.total,
        page.page,
        page.total_pages,
        page.limit,
        if pending { " · loading" } else { "" }
    );
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(table, chunks[1]);

    // Logs
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, chunks[2]);
}
