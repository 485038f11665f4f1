//! TUI module - Today / Exercises screens with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
};
use std::io::{stdout, Stdout};

use crate::exercises::{format_weight, Category, Exercise};
use crate::session::Session;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Weight change per +/- key press, in lb
const WEIGHT_STEP: f64 = 1.0;

/// Add-exercise form field labels, in input order
const FORM_FIELDS: [&str; 4] = ["Id", "Name", "Category", "Default weight (lb)"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Today,
    Exercises,
}

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}

/// Add-exercise form state
#[derive(Debug, Clone)]
struct AddForm {
    fields: [String; 4],
    focus: usize,
}

impl AddForm {
    fn new(category: Category) -> Self {
        Self {
            fields: [
                String::new(),
                String::new(),
                category.name().to_string(),
                "0".to_string(),
            ],
            focus: 0,
        }
    }

    fn push(&mut self, c: char) {
        self.fields[self.focus].push(c);
    }

    fn pop(&mut self) {
        self.fields[self.focus].pop();
    }

    fn next(&mut self) {
        self.focus = (self.focus + 1) % FORM_FIELDS.len();
    }

    fn prev(&mut self) {
        self.focus = (self.focus + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
    }

    /// Parse the raw fields. Name and weight range are checked later by
    /// [`Exercise::validate`].
    fn to_exercise(&self) -> Result<Exercise, String> {
        let [id, name, category, weight] = &self.fields;
        let id = id.trim();
        if id.is_empty() {
            return Err("id must not be empty".to_string());
        }
        let category: Category = category.parse()?;
        let weight: f64 = weight
            .trim()
            .parse()
            .map_err(|_| format!("weight {:?} is not a number", weight.trim()))?;
        Ok(Exercise::new(id, name.trim(), category, weight))
    }
}

/// App state for TUI
pub struct App {
    session: Session,
    tab: Tab,
    selected: usize,
    status: Option<Status>,
    form: Option<AddForm>,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            tab: Tab::Today,
            selected: 0,
            status: None,
            form: None,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        // Restore the terminal even when the loop fails
        let result = self.event_loop(&mut terminal);
        restore_terminal()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        let titles = vec!["Today", "Exercises"];
        let tabs = Tabs::new(titles)
            .select(match self.tab {
                Tab::Today => 0,
                Tab::Exercises => 1,
            })
            .style(Style::default().fg(Color::Cyan).bold())
            .highlight_style(Style::default().fg(Color::Yellow).bold())
            .block(Block::default().borders(Borders::ALL).title(format!("PT plan - {}", self.session.day())));
        frame.render_widget(tabs, chunks[0]);

        // Shortage notice / status line
        let (text, color) = match (&self.status, self.session.plan().notice_text()) {
            (Some(Status::Info(msg)), _) => (msg.clone(), Color::Green),
            (Some(Status::Error(msg)), _) => (msg.clone(), Color::Red),
            (None, Some(notice)) => (notice, Color::Yellow),
            (None, None) => (format!("Picks {} from active exercises", self.session.quota()), Color::DarkGray),
        };
        let notice = Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(notice, chunks[1]);

        match (&self.form, self.tab) {
            (Some(form), _) => render_form(form, frame, chunks[2]),
            (None, Tab::Today) => self.render_today(frame, chunks[2]),
            (None, Tab::Exercises) => self.render_exercises(frame, chunks[2]),
        }

        let help = match (&self.form, self.tab) {
            (Some(_), _) => "enter: add | tab/↑↓: field | esc: cancel",
            (None, Tab::Today) => {
                "q: quit | tab: exercises | g: generate | ↑↓: select | +/-: weight | d: make default | a: add"
            }
            (None, Tab::Exercises) => "q: quit | tab: today | ↑↓: select | space: toggle active | a: add",
        };
        let footer = Paragraph::new(help)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[3]);
    }

    fn render_today(&self, frame: &mut Frame, area: Rect) {
        let exercises = self.session.plan_exercises();

        if exercises.is_empty() {
            let empty = Paragraph::new("No plan yet. Press 'g' to generate one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title("Today's exercises"));
            frame.render_widget(empty, area);
            return;
        }

        let rows: Vec<Row> = exercises
            .iter()
            .map(|ex| {
                let current = self
                    .session
                    .current_weight(&ex.id)
                    .unwrap_or(ex.default_weight);
                Row::new(vec![
                    Cell::from(ex.name.clone()),
                    Cell::from(format!("{} {}", ex.category.emoji(), ex.category)),
                    Cell::from(format_weight(current)),
                    Cell::from(format_weight(ex.default_weight)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(12),
                Constraint::Length(12),
            ],
        )
        .header(Row::new(vec!["Exercise", "Category", "Weight", "Default"])
            .style(Style::default().bold()))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Today's exercises"));

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_exercises(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .catalog_rows()
            .iter()
            .map(|ex| {
                let style = if ex.is_active {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Row::new(vec![
                    Cell::from(format!("{} {}", ex.category.emoji(), ex.category)),
                    Cell::from(ex.name.clone()),
                    Cell::from(format_weight(ex.default_weight)),
                    Cell::from(if ex.is_active { "active" } else { "inactive" }),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(Row::new(vec!["Category", "Exercise", "Default", "Status"])
            .style(Style::default().bold()))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Exercises"));

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    /// Whole catalog, grouped in plan category order
    fn catalog_rows(&self) -> Vec<&Exercise> {
        let catalog = self.session.catalog();
        Category::all()
            .iter()
            .flat_map(move |c| catalog.iter().filter(move |e| e.category == *c))
            .collect()
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::Today => self.session.plan().len(),
            Tab::Exercises => self.session.catalog().len(),
        }
    }

    fn selected_id(&self) -> Option<String> {
        match self.tab {
            Tab::Today => self.session.plan_exercises().get(self.selected).map(|e| e.id.clone()),
            Tab::Exercises => self.catalog_rows().get(self.selected).map(|e| e.id.clone()),
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code)?;
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        if self.form.is_some() {
            self.handle_form_key(code);
            return Ok(());
        }

        self.status = None;
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => {
                self.tab = match self.tab {
                    Tab::Today => Tab::Exercises,
                    Tab::Exercises => Tab::Today,
                };
                self.selected = 0;
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.row_count() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('g') if self.tab == Tab::Today => {
                self.session.generate_plan();
                self.selected = 0;
            }
            KeyCode::Char('+') | KeyCode::Char('=') if self.tab == Tab::Today => {
                self.adjust_weight(WEIGHT_STEP)?;
            }
            KeyCode::Char('-') if self.tab == Tab::Today => {
                self.adjust_weight(-WEIGHT_STEP)?;
            }
            KeyCode::Char('d') if self.tab == Tab::Today => {
                if let Some(id) = self.selected_id() {
                    self.status = Some(match self.session.promote_to_default(&id) {
                        Ok(weight) => Status::Info(format!("{} default is now {}", id, format_weight(weight))),
                        Err(e) => Status::Error(e.to_string()),
                    });
                }
            }
            KeyCode::Char(' ') if self.tab == Tab::Exercises => {
                if let Some(id) = self.selected_id() {
                    let active = self.session.catalog().get(&id).is_some_and(|e| e.is_active);
                    if let Err(e) = self.session.set_active(&id, !active) {
                        self.status = Some(Status::Error(e.to_string()));
                    }
                }
            }
            KeyCode::Char('a') => {
                let category = match self.tab {
                    Tab::Exercises => self
                        .selected_id()
                        .and_then(|id| self.session.catalog().get(&id).map(|e| e.category)),
                    Tab::Today => None,
                };
                self.form = Some(AddForm::new(category.unwrap_or(Category::Quad)));
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.form = None;
                self.status = None;
                return;
            }
            KeyCode::Enter => {
                self.submit_form();
                return;
            }
            _ => {}
        }

        let Some(form) = self.form.as_mut() else {
            return;
        };
        match code {
            KeyCode::Tab | KeyCode::Down => form.next(),
            KeyCode::BackTab | KeyCode::Up => form.prev(),
            KeyCode::Backspace => form.pop(),
            KeyCode::Char(c) => form.push(c),
            _ => {}
        }
    }

    /// Validate the form and add the exercise. On failure the form stays
    /// open and the error goes to the status line.
    fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };

        let exercise = match form.to_exercise() {
            Ok(exercise) => exercise,
            Err(msg) => {
                self.status = Some(Status::Error(msg));
                return;
            }
        };

        let id = exercise.id.clone();
        let result = exercise
            .validate()
            .and_then(|_| self.session.add_exercise(exercise));

        match result {
            Ok(()) => {
                self.form = None;
                self.status = Some(Status::Info(format!("Added {}", id)));
            }
            Err(e) => self.status = Some(Status::Error(e.to_string())),
        }
    }

    fn adjust_weight(&mut self, delta: f64) -> Result<()> {
        if let Some(id) = self.selected_id() {
            let current = self.session.current_weight(&id)?;
            // Widget floor is 0; the engine itself accepts anything
            self.session.set_weight(&id, (current + delta).max(0.0));
        }
        Ok(())
    }
}

fn render_form(form: &AddForm, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = FORM_FIELDS
        .iter()
        .zip(form.fields.iter())
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i == form.focus {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            let cursor = if i == form.focus { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:20}", label), style),
                Span::raw(format!("{}{}", value, cursor)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Add exercise"));
    frame.render_widget(paragraph, area);
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn app() -> App {
        App::new(Session::new(Catalog::seed(), "2025-10-22"))
    }

    #[test]
    fn test_generate_key_builds_plan() {
        let mut app = app();
        app.handle_key(KeyCode::Char('g')).unwrap();
        assert_eq!(app.session.plan().len(), 5);
        assert_eq!(app.row_count(), 5);
    }

    #[test]
    fn test_weight_keys_adjust_selected() {
        let mut app = app();
        app.handle_key(KeyCode::Char('g')).unwrap();
        let id = app.selected_id().unwrap();
        let before = app.session.current_weight(&id).unwrap();

        app.handle_key(KeyCode::Char('+')).unwrap();
        app.handle_key(KeyCode::Char('+')).unwrap();
        assert_eq!(app.session.current_weight(&id).unwrap(), before + 2.0);
    }

    #[test]
    fn test_minus_key_floors_at_zero() {
        let mut app = app();
        app.session.set_active("hip1", false).unwrap();
        app.handle_key(KeyCode::Char('g')).unwrap();
        // Glute Bridge is the only hip left and it is bodyweight
        let hip_row = app.session.plan().ids.iter().position(|id| id == "hip2").unwrap();
        app.selected = hip_row;
        app.handle_key(KeyCode::Char('-')).unwrap();
        assert_eq!(app.session.current_weight("hip2").unwrap(), 0.0);
    }

    #[test]
    fn test_make_default_key_promotes() {
        let mut app = app();
        app.handle_key(KeyCode::Char('g')).unwrap();
        let id = app.selected_id().unwrap();
        app.session.set_weight(&id, 42.0);

        app.handle_key(KeyCode::Char('d')).unwrap();
        assert_eq!(app.session.catalog().get(&id).unwrap().default_weight, 42.0);
        assert!(matches!(app.status, Some(Status::Info(_))));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c)).unwrap();
        }
    }

    fn clear_field(app: &mut App) {
        for _ in 0..10 {
            app.handle_key(KeyCode::Backspace).unwrap();
        }
    }

    /// Open the form and fill id, name, category and weight
    fn fill_form(app: &mut App, id: &str, name: &str, category: &str, weight: &str) {
        app.handle_key(KeyCode::Char('a')).unwrap();
        type_text(app, id);
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(app, name);
        app.handle_key(KeyCode::Tab).unwrap();
        clear_field(app);
        type_text(app, category);
        app.handle_key(KeyCode::Tab).unwrap();
        clear_field(app);
        type_text(app, weight);
    }

    #[test]
    fn test_add_form_adds_exercise() {
        let mut app = app();
        fill_form(&mut app, "q4", "Wall Sit", "quad", "12.5");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(app.form.is_none());
        assert_eq!(app.status, Some(Status::Info("Added q4".to_string())));
        let added = app.session.catalog().get("q4").unwrap();
        assert_eq!(added.name, "Wall Sit");
        assert_eq!(added.category, Category::Quad);
        assert_eq!(added.default_weight, 12.5);
        assert!(added.is_active);
    }

    #[test]
    fn test_add_form_rejects_empty_name() {
        let mut app = app();
        fill_form(&mut app, "h3", "   ", "hamstring", "5");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(app.form.is_some());
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("empty name")));
        assert!(!app.session.catalog().contains("h3"));
        assert_eq!(app.session.catalog().len(), 9);
    }

    #[test]
    fn test_add_form_rejects_negative_weight() {
        let mut app = app();
        fill_form(&mut app, "h3", "Nordic Curl", "hamstring", "-3");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(app.form.is_some());
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("invalid weight")));
        assert!(!app.session.catalog().contains("h3"));
    }

    #[test]
    fn test_add_form_rejects_duplicate_id_and_bad_input() {
        let mut app = app();
        fill_form(&mut app, "q1", "Wall Sit", "quad", "0");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("duplicate")));

        app.handle_key(KeyCode::Esc).unwrap();
        fill_form(&mut app, "s1", "Shrug", "shoulder", "0");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("unknown category")));

        app.handle_key(KeyCode::Esc).unwrap();
        fill_form(&mut app, "a3", "Heel Raise", "ankle", "heavy");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("not a number")));
        assert_eq!(app.session.catalog().len(), 9);
    }

    #[test]
    fn test_add_form_keys_do_not_leak() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a')).unwrap();
        // 'q' and 'g' are typed into the form, not treated as commands
        type_text(&mut app, "qg");
        assert!(!app.should_quit);
        assert!(app.session.plan().is_empty());

        app.handle_key(KeyCode::Esc).unwrap();
        assert!(app.form.is_none());
        assert_eq!(app.session.catalog().len(), 9);
    }

    #[test]
    fn test_added_exercise_joins_next_plan() {
        let mut app = app();
        for id in ["hip1", "hip2"] {
            app.session.set_active(id, false).unwrap();
        }
        fill_form(&mut app, "hip3", "Clamshell", "hip", "0");
        app.handle_key(KeyCode::Enter).unwrap();

        app.handle_key(KeyCode::Char('g')).unwrap();
        assert!(app.session.plan().contains("hip3"));
        assert_eq!(app.session.current_weight("hip3").unwrap(), 0.0);
    }

    #[test]
    fn test_space_toggles_active_on_exercises_tab() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        assert_eq!(app.tab, Tab::Exercises);

        // First row is the first quad
        app.handle_key(KeyCode::Char(' ')).unwrap();
        assert!(!app.session.catalog().get("q1").unwrap().is_active);
        app.handle_key(KeyCode::Char(' ')).unwrap();
        assert!(app.session.catalog().get("q1").unwrap().is_active);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        app.handle_key(KeyCode::Up).unwrap();
        assert_eq!(app.selected, 0);
        app.handle_key(KeyCode::Char('g')).unwrap();
        for _ in 0..10 {
            app.handle_key(KeyCode::Down).unwrap();
        }
        assert_eq!(app.selected, 4);
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q')).unwrap();
        assert!(app.should_quit);
    }
}
