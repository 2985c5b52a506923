use crate::entry::Entry;
use crate::speech::{speech_text, SpeakMode, Speaker};
use crate::store::VocabStore;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

const PAGE_STEP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Entries,
    Categories,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Entries => Page::Categories,
            Page::Categories => Page::Entries,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Entries => "Entries",
            Page::Categories => "Categories",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterType {
    None,
    ByCategory(String),
    Keyword(String),
}

pub struct App {
    store: VocabStore,
    pub filtered: Vec<Entry>,
    pub categories: Vec<(String, usize)>,
    pub state: TableState,
    pub category_state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    pub filter: FilterType,
    /// Some while the user is typing a search keyword
    pub search_input: Option<String>,
    pub status: Option<String>,
}

impl App {
    pub fn new(store: VocabStore) -> Self {
        let filtered = store.list_all().to_vec();
        let categories = store.list_categories();

        let mut state = TableState::default();
        if !filtered.is_empty() {
            state.select(Some(0));
        }
        let mut category_state = TableState::default();
        if !categories.is_empty() {
            category_state.select(Some(0));
        }

        Self {
            store,
            filtered,
            categories,
            state,
            category_state,
            current_page: Page::Entries,
            show_detail: false,
            filter: FilterType::None,
            search_input: None,
            status: None,
        }
    }

    pub fn total(&self) -> usize {
        self.store.len()
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.state.selected().and_then(|i| self.filtered.get(i))
    }

    pub fn apply_filter(&mut self, filter: FilterType) {
        let result = match &filter {
            FilterType::None => Ok(self.store.list_all().iter().collect()),
            FilterType::ByCategory(category) => self.store.list_by_category(category),
            FilterType::Keyword(keyword) => self.store.search(keyword),
        };

        match result {
            Ok(entries) => {
                self.filtered = entries.into_iter().cloned().collect();
                self.filter = filter;
                self.status = None;
            }
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        }

        if !self.filtered.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(FilterType::None);
    }

    /// Filter entries by the category highlighted on the categories page
    pub fn open_selected_category(&mut self) {
        let label = self
            .category_state
            .selected()
            .and_then(|i| self.categories.get(i))
            .map(|(label, _)| label.clone());
        if let Some(label) = label {
            self.apply_filter(FilterType::ByCategory(label));
            self.current_page = Page::Entries;
        }
    }

    pub fn begin_search(&mut self) {
        self.search_input = Some(String::new());
    }

    pub fn submit_search(&mut self) {
        if let Some(keyword) = self.search_input.take() {
            self.apply_filter(FilterType::Keyword(keyword));
            self.current_page = Page::Entries;
        }
    }

    pub fn speak_selected(&mut self, speaker: &dyn Speaker, mode: SpeakMode) {
        if !speaker.available() {
            self.status = Some("text-to-speech is not available".to_string());
            return;
        }
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let text = speech_text(entry, mode);
        self.status = Some(match speaker.speak(&text) {
            Ok(()) => format!("Spoke: {}", text),
            Err(e) => e.to_string(),
        });
    }

    fn active_state(&mut self) -> (&mut TableState, usize) {
        match self.current_page {
            Page::Entries => (&mut self.state, self.filtered.len()),
            Page::Categories => (&mut self.category_state, self.categories.len()),
        }
    }

    pub fn next(&mut self) {
        let (state, len) = self.active_state();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (state, len) = self.active_state();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let (state, len) = self.active_state();
        if len == 0 {
            return;
        }
        let i = state
            .selected()
            .map(|i| (i + PAGE_STEP).min(len - 1))
            .unwrap_or(0);
        state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let (state, len) = self.active_state();
        if len == 0 {
            return;
        }
        let i = state
            .selected()
            .map(|i| i.saturating_sub(PAGE_STEP))
            .unwrap_or(0);
        state.select(Some(i));
    }

    /// Returns false when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent, speaker: &dyn Speaker) -> bool {
        if let Some(input) = self.search_input.as_mut() {
            match key.code {
                KeyCode::Enter => self.submit_search(),
                KeyCode::Esc => self.search_input = None,
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Enter if self.current_page == Page::Categories => {
                self.open_selected_category()
            }
            KeyCode::Enter => self.toggle_detail(),
            KeyCode::Tab | KeyCode::BackTab => self.current_page = self.current_page.next(),
            KeyCode::Char('/') => self.begin_search(),
            KeyCode::Char('c') => self.clear_filter(),
            KeyCode::Char('s') => self.speak_selected(speaker, SpeakMode::ContentOnly),
            KeyCode::Char('S') => self.speak_selected(speaker, SpeakMode::Full),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => {
                let (state, len) = self.active_state();
                if len > 0 {
                    state.select(Some(0));
                }
            }
            KeyCode::End => {
                let (state, len) = self.active_state();
                if len > 0 {
                    state.select(Some(len - 1));
                }
            }
            _ => {}
        }
        true
    }
}

pub fn run_ui(app: &mut App, speaker: &dyn Speaker) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, speaker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    speaker: &dyn Speaker,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if !app.handle_key(key, speaker) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Entries {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        render_entries(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Entries => render_entries(f, chunks[1], app),
            Page::Categories => render_categories(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Entries, Page::Categories].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }
        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Entries: {}", app.total()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Categories: {}", app.categories.len()),
        Style::default().fg(Color::Cyan),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1)
}

fn render_entries(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = app.filtered.iter().map(|entry| {
        Row::new(vec![
            Cell::from(truncate(&entry.content, 28)),
            Cell::from(truncate(&entry.category, 14)).style(Style::default().fg(Color::Cyan)),
            Cell::from(truncate(&entry.explanation, 60)),
        ])
        .height(1)
    });

    let title = match &app.filter {
        FilterType::None => " Entries ".to_string(),
        FilterType::ByCategory(c) => format!(" Entries in {} ", c),
        FilterType::Keyword(k) => format!(" Entries matching \"{}\" ", k),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(16),
            Constraint::Min(20),
        ],
    )
    .header(header_row(&["Term", "Category", "Explanation"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_categories(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = app.categories.iter().map(|(label, count)| {
        let color = if *count > 0 { Color::Green } else { Color::DarkGray };
        Row::new(vec![
            Cell::from(label.clone()),
            Cell::from(format!("{}", count)).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(rows, [Constraint::Length(24), Constraint::Length(10)])
        .header(header_row(&["Category", "Entries"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Categories - Enter to filter "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.category_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, app.filtered.len()),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(input) = &app.search_input {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Search: {}_", input),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" (Enter apply, Esc cancel)"));
    } else if let Some(message) = &app.status {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(message.clone(), Style::default().fg(Color::Magenta)));
    } else {
        let keys = [
            ("Enter", " Details"),
            ("Tab", " Page"),
            ("/", " Search"),
            ("c", " Clear"),
            ("s/S", " Speak"),
        ];
        for (key, label) in keys {
            status_spans.push(Span::raw(" | "));
            status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(label));
        }
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Entry Details ");

    let Some(entry) = app.selected_entry() else {
        f.render_widget(Paragraph::new("No entry selected").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut content = vec![
        Line::from(vec![Span::styled("Term: ", label), Span::raw(entry.content.clone())]),
        Line::from(vec![
            Span::styled("Category: ", label),
            Span::raw(entry.category.clone()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Explanation", label)),
        Line::from(entry.explanation.clone()),
    ];

    if !entry.example.is_empty() {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled("Example", label)));
        for line in entry.example.lines() {
            content.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Green),
            )));
        }
    }
    if !entry.pronunciation.is_empty() {
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled("Pronunciation: ", label),
            Span::raw(entry.pronunciation.clone()),
        ]));
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let detail_panel = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(detail_panel, area);
}

/// Shorten to `max_chars` characters, ending in "..."
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
