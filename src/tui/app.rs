//! The interactive list controller.
//!
//! `App` owns the search state and the view, issues a background fetch
//! whenever state changes, and applies completions as they drain from the
//! channel. Every request carries a sequence token; a completion whose token
//! is not the latest issued request is stale and never touches the view.

use crate::client::RecipeClient;
use crate::error::Result;
use crate::model::{Recipe, SearchPage};
use crate::state::{FilterField, ListPhase, SearchState};
use crate::tui::filters::{FilterBar, Focus};
use crate::tui::table::TableState;
use crate::tui::ui;
use crate::view::{DrawerView, Pagination};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

/// Messages from background fetch threads
pub enum BgMessage {
    SearchComplete { seq: u64, page: SearchPage },
    SearchFailed { seq: u64, error: String },
}

pub struct App {
    // Data
    pub rows: Vec<Recipe>,
    pub pagination: Pagination,
    pub phase: ListPhase,

    // State
    pub state: SearchState,
    pub filters: FilterBar,
    pub table: TableState,
    pub drawer: Option<DrawerView>,

    // Fetch plumbing
    client: RecipeClient,
    search_dirty: bool,
    pub in_flight: bool,
    latest_seq: u64,
    bg_receiver: Receiver<BgMessage>,
    bg_sender: Sender<BgMessage>,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(client: RecipeClient) -> Self {
        let (tx, rx) = channel();

        Self {
            rows: Vec::new(),
            pagination: Pagination::default(),
            phase: ListPhase::default(),
            state: SearchState::default(),
            filters: FilterBar::default(),
            table: TableState::default(),
            drawer: None,
            client,
            // Initial fetch fires on the first loop iteration
            search_dirty: true,
            in_flight: false,
            latest_seq: 0,
            bg_receiver: rx,
            bg_sender: tx,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend<Error = std::io::Error>>) -> Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if self.search_dirty {
                self.request_search();
            }

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    self.handle_key(key);
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    // --- Controller operations ---

    /// Move by `delta` pages and schedule a search.
    pub fn step_page(&mut self, delta: i32) {
        self.state.step_page(delta);
        self.search_dirty = true;
    }

    /// Switch to the next per-page option and schedule a search.
    pub fn cycle_page_size(&mut self) {
        let next = self.state.next_page_size();
        self.state.set_page_size(next);
        self.search_dirty = true;
    }

    /// Set a filter value (resetting to page 1) and schedule a search.
    pub fn set_filter(&mut self, field: FilterField, value: String) {
        self.state.set_filter(field, value);
        self.search_dirty = true;
    }

    /// Open the detail drawer for the selected row, if any.
    pub fn open_drawer(&mut self) {
        if let Some(index) = self.table.selected {
            if let Some(recipe) = self.rows.get(index) {
                self.drawer = Some(DrawerView::from_recipe(recipe));
            }
        }
    }

    pub fn close_drawer(&mut self) {
        self.drawer = None;
    }

    // --- Fetch plumbing ---

    fn request_search(&mut self) {
        self.search_dirty = false;
        self.latest_seq += 1;
        self.in_flight = true;

        let seq = self.latest_seq;
        let client = self.client.clone();
        let state = self.state.clone();
        let tx = self.bg_sender.clone();

        thread::spawn(move || {
            let msg = match client.search(&state) {
                Ok(page) => BgMessage::SearchComplete { seq, page },
                Err(error) => BgMessage::SearchFailed {
                    seq,
                    error: error.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn process_messages(&mut self) {
        while let Ok(msg) = self.bg_receiver.try_recv() {
            match msg {
                BgMessage::SearchComplete { seq, page } => {
                    // A newer request owns the view
                    if seq != self.latest_seq {
                        continue;
                    }
                    self.in_flight = false;
                    self.pagination =
                        Pagination::compute(page.page, page.total, self.state.per_page);
                    self.phase = ListPhase::after_fetch(true, page.data.len());
                    self.rows = page.data;
                    self.table.reset(self.rows.len());
                }
                BgMessage::SearchFailed { seq, error } => {
                    if seq != self.latest_seq {
                        continue;
                    }
                    self.in_flight = false;
                    warn!(error = %error, "recipe search failed");
                    self.rows.clear();
                    self.table.reset(0);
                    self.phase = ListPhase::after_fetch(false, 0);
                }
            }
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        // The drawer is modal
        if self.drawer.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.close_drawer();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                match self.filters.focused_field() {
                    Some(field) if !self.state.filter(field).is_empty() => {
                        self.filters.set_cursor(field, 0);
                        self.set_filter(field, String::new());
                    }
                    Some(_) => self.filters.focus = Focus::Table,
                    None => self.should_quit = true,
                }
                return;
            }
            KeyCode::Tab => {
                self.filters.focus = self.filters.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.filters.focus = self.filters.focus.prev();
                return;
            }
            _ => {}
        }

        match self.filters.focused_field() {
            Some(field) => self.handle_filter_key(field, key),
            None => self.handle_table_key(key),
        }
    }

    fn handle_filter_key(&mut self, field: FilterField, key: KeyEvent) {
        let mut text = self.state.filter(field).to_string();
        self.filters.clamp_cursor(field, &text);
        let pos = self.filters.cursor(field);

        match key.code {
            KeyCode::Char(c) => {
                text.insert(pos, c);
                self.filters.set_cursor(field, pos + c.len_utf8());
                self.set_filter(field, text);
            }
            KeyCode::Backspace => {
                if pos > 0 {
                    // Previous character boundary
                    let prev = text[..pos]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    text.remove(prev);
                    self.filters.set_cursor(field, prev);
                    self.set_filter(field, text);
                }
            }
            KeyCode::Delete => {
                if pos < text.len() {
                    text.remove(pos);
                    self.set_filter(field, text);
                }
            }
            KeyCode::Left => {
                if pos > 0 {
                    let prev = text[..pos]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.filters.set_cursor(field, prev);
                }
            }
            KeyCode::Right => {
                if pos < text.len() {
                    let next = text[pos..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| pos + i)
                        .unwrap_or(text.len());
                    self.filters.set_cursor(field, next);
                }
            }
            KeyCode::Home => {
                self.filters.set_cursor(field, 0);
            }
            KeyCode::End => {
                self.filters.set_cursor(field, text.len());
            }
            KeyCode::Enter | KeyCode::Down => {
                self.filters.focus = Focus::Table;
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.rows.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::PageUp => self.table.page_up(),
            KeyCode::PageDown => self.table.page_down(total),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(total),

            // Pagination, gated like the buttons it stands in for
            KeyCode::Left => {
                if self.pagination.can_prev {
                    self.step_page(-1);
                }
            }
            KeyCode::Right => {
                if self.pagination.can_next {
                    self.step_page(1);
                }
            }

            KeyCode::Char('p') => self.cycle_page_size(),
            KeyCode::Enter => self.open_drawer(),
            KeyCode::Char('/') => {
                self.filters.focus = Focus::Filter(FilterField::Title);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;

    fn app() -> App {
        let client = RecipeClient::new(ClientConfig::default()).unwrap();
        let mut app = App::new(client);
        app.search_dirty = false;
        app
    }

    fn recipe(title: &str) -> Recipe {
        Recipe {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn page_of(rows: Vec<Recipe>, total: u64, page: u32) -> SearchPage {
        SearchPage {
            data: rows,
            total,
            page,
        }
    }

    #[test]
    fn construction_schedules_the_initial_search() {
        let client = RecipeClient::new(ClientConfig::default()).unwrap();
        let app = App::new(client);
        assert!(app.search_dirty);
        assert_eq!(app.latest_seq, 0);
    }

    #[test]
    fn each_operation_schedules_exactly_one_search() {
        let mut app = app();

        app.step_page(1);
        assert!(app.search_dirty);
        assert_eq!(app.state.page, 2);

        app.search_dirty = false;
        app.cycle_page_size();
        assert!(app.search_dirty);
        assert_eq!(app.state.per_page, 25);
        assert_eq!(app.state.page, 1);

        app.search_dirty = false;
        app.set_filter(FilterField::Cuisine, "Italian".to_string());
        assert!(app.search_dirty);
        assert_eq!(app.state.page, 1);
    }

    #[test]
    fn successful_fetch_shows_rows() {
        let mut app = app();
        app.latest_seq = 1;
        app.bg_sender
            .send(BgMessage::SearchComplete {
                seq: 1,
                page: page_of(vec![recipe("Lasagna")], 1, 1),
            })
            .unwrap();

        app.process_messages();

        assert_eq!(app.phase, ListPhase::Rows);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.table.selected, Some(0));
        assert_eq!(app.pagination.label(), "Page 1 of 1");
        assert!(!app.pagination.can_prev);
        assert!(!app.pagination.can_next);
    }

    #[test]
    fn empty_fetch_shows_no_results() {
        let mut app = app();
        app.latest_seq = 1;
        app.bg_sender
            .send(BgMessage::SearchComplete {
                seq: 1,
                page: page_of(vec![], 0, 1),
            })
            .unwrap();

        app.process_messages();

        assert_eq!(app.phase, ListPhase::NoResults);
        assert!(app.rows.is_empty());
        assert_eq!(app.table.selected, None);
    }

    #[test]
    fn failed_fetch_shows_no_data_and_clears_rows() {
        let mut app = app();
        app.latest_seq = 1;
        app.rows = vec![recipe("Stale Row")];
        app.bg_sender
            .send(BgMessage::SearchFailed {
                seq: 1,
                error: "connection refused".to_string(),
            })
            .unwrap();

        app.process_messages();

        assert_eq!(app.phase, ListPhase::NoData);
        assert!(app.rows.is_empty());
    }

    #[test]
    fn stale_responses_never_touch_the_view() {
        let mut app = app();
        app.latest_seq = 2;

        app.bg_sender
            .send(BgMessage::SearchComplete {
                seq: 1,
                page: page_of(vec![recipe("Old")], 100, 4),
            })
            .unwrap();
        app.process_messages();
        assert!(app.rows.is_empty());

        app.bg_sender
            .send(BgMessage::SearchComplete {
                seq: 2,
                page: page_of(vec![recipe("Fresh")], 1, 1),
            })
            .unwrap();
        app.process_messages();
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].title, "Fresh");
    }

    #[test]
    fn stale_error_does_not_clear_fresh_rows() {
        let mut app = app();
        app.latest_seq = 2;
        app.bg_sender
            .send(BgMessage::SearchComplete {
                seq: 2,
                page: page_of(vec![recipe("Fresh")], 1, 1),
            })
            .unwrap();
        app.bg_sender
            .send(BgMessage::SearchFailed {
                seq: 1,
                error: "timed out".to_string(),
            })
            .unwrap();

        app.process_messages();

        assert_eq!(app.phase, ListPhase::Rows);
        assert_eq!(app.rows.len(), 1);
    }

    #[test]
    fn drawer_opens_for_selected_row_and_closes() {
        let mut app = app();
        app.latest_seq = 1;
        app.bg_sender
            .send(BgMessage::SearchComplete {
                seq: 1,
                page: page_of(vec![recipe("Lasagna")], 1, 1),
            })
            .unwrap();
        app.process_messages();

        app.open_drawer();
        let drawer = app.drawer.as_ref().expect("drawer should open");
        assert!(drawer.heading.starts_with("Lasagna"));

        app.close_drawer();
        assert!(app.drawer.is_none());
    }

    #[test]
    fn drawer_does_not_open_without_rows() {
        let mut app = app();
        app.open_drawer();
        assert!(app.drawer.is_none());
    }

    #[test]
    fn typing_into_a_filter_updates_state_per_keystroke() {
        let mut app = app();
        app.filters.focus = Focus::Filter(FilterField::Cuisine);

        for c in "It".chars() {
            app.search_dirty = false;
            app.handle_key(KeyEvent::from(KeyCode::Char(c)));
            assert!(app.search_dirty, "keystroke '{c}' must schedule a search");
        }

        assert_eq!(app.state.filter(FilterField::Cuisine), "It");
        assert_eq!(app.state.page, 1);
    }

    #[test]
    fn escape_clears_focused_filter_before_unfocusing() {
        let mut app = app();
        app.filters.focus = Focus::Filter(FilterField::Title);
        app.set_filter(FilterField::Title, "pasta".to_string());
        app.search_dirty = false;

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert_eq!(app.state.filter(FilterField::Title), "");
        assert!(app.search_dirty);
        assert_eq!(app.filters.focus, Focus::Filter(FilterField::Title));

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert_eq!(app.filters.focus, Focus::Table);

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn page_keys_respect_disablement() {
        let mut app = app();
        app.filters.focus = Focus::Table;
        app.latest_seq = 1;
        app.bg_sender
            .send(BgMessage::SearchComplete {
                seq: 1,
                page: page_of(vec![recipe("A")], 100, 1),
            })
            .unwrap();
        app.process_messages();
        app.search_dirty = false;

        // On page 1 of 7: prev is a no-op, next advances
        app.handle_key(KeyEvent::from(KeyCode::Left));
        assert_eq!(app.state.page, 1);
        assert!(!app.search_dirty);

        app.handle_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(app.state.page, 2);
        assert!(app.search_dirty);
    }
}
