//! Retro-style main menu for the to-do list.
//!
//! The menu borrows the session's [`TaskStore`] for its whole lifetime and
//! applies every action straight to it. Saving happens after the menu exits.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::error::TaskError;
use crate::fields::Priority;
use crate::store::{parse_task_id, TaskStore};
use crate::task::Task;
use crate::tui::colors::priority_color;
use crate::tui::enums::{IdAction, MenuState, MENU_ITEMS};
use crate::tui::input::InputField;
use crate::tui::utils::centered_rect;

/// Main menu application state.
pub struct MenuApp<'a> {
    store: &'a mut TaskStore,
    state: MenuState,
    list_state: ListState,
    task_list_state: ListState,
    input: InputField,
    /// Description captured before the priority prompt.
    pending_description: String,
    /// Load report shown under the main menu.
    notices: Vec<String>,
    status_message: String,
    should_exit: bool,
}

impl<'a> MenuApp<'a> {
    /// Create a new menu over the given store.
    pub fn new(store: &'a mut TaskStore, notices: Vec<String>) -> Self {
        let mut app = MenuApp {
            store,
            state: MenuState::MainMenu,
            list_state: ListState::default(),
            task_list_state: ListState::default(),
            input: InputField::new(),
            pending_description: String::new(),
            notices,
            status_message: String::new(),
            should_exit: false,
        };
        app.list_state.select(Some(0));
        app
    }

    /// Check if the application should exit.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    #[cfg(test)]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[cfg(test)]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Poll for a key press and dispatch it.
    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle a single key press based on current state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }

        self.status_message.clear();
        if self.state.is_text_input() {
            self.handle_text_input(key.code);
            return;
        }
        match self.state {
            MenuState::MainMenu => self.handle_main_menu_input(key.code),
            MenuState::TaskList | MenuState::SortedList => self.handle_task_list_input(key.code),
            _ => {}
        }
    }

    /// Handle input for the main menu state.
    fn handle_main_menu_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                }
            },
            KeyCode::Down => {
                if let Some(selected) = self.list_state.selected() {
                    if selected < MENU_ITEMS.len() - 1 {
                        self.list_state.select(Some(selected + 1));
                    }
                }
            },
            KeyCode::Enter => {
                if let Some(selected) = self.list_state.selected() {
                    self.select_menu_item(selected);
                }
            },
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                self.list_state.select(Some(index));
                self.select_menu_item(index);
            },
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_exit = true;
            },
            _ => {}
        }
    }

    fn select_menu_item(&mut self, index: usize) {
        self.input.take();
        match index {
            0 => self.state = MenuState::AddDescription,
            1 => self.open_task_list(MenuState::TaskList),
            2 => self.state = MenuState::EnterId(IdAction::Complete),
            3 => self.state = MenuState::EnterId(IdAction::Delete),
            4 => self.state = MenuState::EnterId(IdAction::Edit),
            5 => self.open_task_list(MenuState::SortedList),
            6 => self.should_exit = true,
            _ => {}
        }
    }

    fn open_task_list(&mut self, state: MenuState) {
        self.state = state;
        let first = if self.store.is_empty() { None } else { Some(0) };
        self.task_list_state.select(first);
    }

    fn back_to_main_menu(&mut self) {
        self.input.take();
        self.pending_description.clear();
        self.state = MenuState::MainMenu;
    }

    /// Handle input while a task list is shown.
    fn handle_task_list_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected > 0 {
                        self.task_list_state.select(Some(selected - 1));
                    }
                }
            },
            KeyCode::Down => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < self.store.len() {
                        self.task_list_state.select(Some(selected + 1));
                    }
                }
            },
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.back_to_main_menu(),
            _ => {}
        }
    }

    /// Handle input for the prompt screens.
    fn handle_text_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.back_to_main_menu(),
            KeyCode::Enter => {
                let value = self.input.take();
                self.submit(value);
            },
            KeyCode::Char(c) => self.input.handle_char(c),
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_cursor_home(),
            KeyCode::End => self.input.move_cursor_end(),
            _ => {}
        }
    }

    /// Apply the value entered at the current prompt.
    fn submit(&mut self, value: String) {
        match self.state {
            MenuState::AddDescription => {
                self.pending_description = value;
                self.state = MenuState::AddPriority;
            },
            MenuState::AddPriority => {
                let description = std::mem::take(&mut self.pending_description);
                self.status_message = match Priority::from_index(&value)
                    .and_then(|priority| self.store.add(&description, priority))
                {
                    Ok(id) => format!("Task {} added successfully!", id),
                    Err(e) => format!("{}. Task not added.", e),
                };
                self.back_to_main_menu();
            },
            MenuState::EnterId(action) => {
                match parse_task_id(&value) {
                    Ok(id) => self.apply_id_action(action, id),
                    Err(e) => {
                        self.status_message = e.to_string();
                        self.back_to_main_menu();
                    }
                }
            },
            MenuState::EditDescription(id) => {
                self.status_message = match self.store.edit_description(id, &value) {
                    Ok(()) => "Task description updated successfully!".to_string(),
                    Err(e) => e.to_string(),
                };
                self.back_to_main_menu();
            },
            _ => {}
        }
    }

    fn apply_id_action(&mut self, action: IdAction, id: u64) {
        match action {
            IdAction::Complete => {
                self.status_message = match self.store.complete(id) {
                    Ok(()) => "Task marked as complete!".to_string(),
                    Err(e) => e.to_string(),
                };
                self.back_to_main_menu();
            },
            IdAction::Delete => {
                self.status_message = if self.store.delete(id) > 0 {
                    "Task deleted successfully!".to_string()
                } else {
                    TaskError::NotFound(id).to_string()
                };
                self.back_to_main_menu();
            },
            IdAction::Edit => match self.store.find(id) {
                Some(task) => {
                    self.input = InputField::with_value(&task.description);
                    self.state = MenuState::EditDescription(id);
                },
                None => {
                    self.status_message = TaskError::NotFound(id).to_string();
                    self.back_to_main_menu();
                }
            },
        }
    }

    /// Main render function that dispatches to state-specific renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        match self.state {
            MenuState::MainMenu => self.render_main_menu(f, chunks[1]),
            MenuState::TaskList => self.render_task_list(f, chunks[1], false),
            MenuState::SortedList => self.render_task_list(f, chunks[1], true),
            MenuState::AddDescription => {
                self.render_prompt(f, chunks[1], "Add Task", "Enter task description:")
            },
            MenuState::AddPriority => {
                self.render_prompt(f, chunks[1], "Add Task", &priority_prompt())
            },
            MenuState::EnterId(action) => {
                self.render_prompt(f, chunks[1], action.title(), action.prompt())
            },
            MenuState::EditDescription(id) => {
                let prompt = format!("Enter new description for task {}:", id);
                self.render_prompt(f, chunks[1], "Edit Task Description", &prompt)
            },
        }

        self.render_status_bar(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let summary = format!(
            "  {} task(s), {} completed",
            self.store.len(),
            self.store.completed_count()
        );
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TO-DO LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(summary, Style::default().fg(Color::Gray)),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));

        f.render_widget(header, area);
    }

    /// Render the main menu with the load report underneath.
    fn render_main_menu(&mut self, f: &mut Frame, area: Rect) {
        let notice_height = if self.notices.is_empty() {
            0
        } else {
            self.notices.len().min(8) as u16 + 2
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(notice_height)])
            .split(area);

        let menu_items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| ListItem::new(Line::from(format!("  {}. {}", i + 1, item))))
            .collect();

        let menu = List::new(menu_items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol("► ");

        f.render_stateful_widget(menu, chunks[0], &mut self.list_state);

        if !self.notices.is_empty() {
            let lines: Vec<Line> = self.notices.iter().map(|n| Line::from(n.as_str())).collect();
            let notices = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Startup"))
                .wrap(Wrap { trim: true });
            f.render_widget(notices, chunks[1]);
        }
    }

    /// Render tasks in store order, or sorted by priority.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect, sorted: bool) {
        let tasks: Vec<&Task> = if sorted {
            self.store.sort_by_priority()
        } else {
            self.store.list().iter().collect()
        };

        let items: Vec<ListItem> = if tasks.is_empty() {
            vec![ListItem::new(Line::from("  No tasks."))]
        } else {
            tasks.iter().map(|t| task_item(t)).collect()
        };

        let title = if sorted { "Sorted Tasks by Priority" } else { "Tasks" };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        f.render_stateful_widget(list, area, &mut self.task_list_state);
    }

    /// Render a single-line prompt dialog.
    fn render_prompt(&self, f: &mut Frame, area: Rect, title: &str, prompt: &str) {
        let area = centered_rect(70, 40, area);
        f.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Instructions
                Constraint::Length(3), // Input field
                Constraint::Min(0),    // Spacer
            ])
            .split(area);

        let instructions = Paragraph::new(prompt)
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Left);

        f.render_widget(instructions, chunks[0]);

        let (scroll, column) = input_viewport(self.input.cursor, chunks[1].width.saturating_sub(2));
        let input = Paragraph::new(self.input.value.as_str())
            .scroll((0, scroll))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(input, chunks[1]);

        f.set_cursor_position((chunks[1].x + 1 + column, chunks[1].y + 1));
    }

    /// Render the status bar with context-appropriate help text.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                MenuState::MainMenu => "Use ↑↓ or 1-7 to choose, Enter to select, q/Esc to save and quit".to_string(),
                MenuState::TaskList | MenuState::SortedList => "Use ↑↓ to scroll, Enter/Esc to go back".to_string(),
                _ => "Type and press Enter to confirm, Esc to cancel".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main event loop for the menu application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            self.handle_input()?;

            if self.should_exit {
                break;
            }
        }
        Ok(())
    }
}

/// Priority prompt listing each menu index and label.
fn priority_prompt() -> String {
    let choices: Vec<String> = Priority::all()
        .enumerate()
        .map(|(i, p)| format!("{}: {}", i, p))
        .collect();
    format!("Choose task priority ({}):", choices.join(", "))
}

/// One task row, colored by priority and dimmed once completed.
fn task_item(task: &Task) -> ListItem<'static> {
    let mut style = Style::default().fg(priority_color(task.priority));
    if task.completed {
        style = style.add_modifier(Modifier::DIM);
    }
    ListItem::new(Line::from(Span::styled(format!("  {}", task), style)))
}

/// Horizontal scroll and cursor column for a single-line input box whose
/// inner width is `inner_width`. Keeps the cursor inside the box.
fn input_viewport(cursor: usize, inner_width: u16) -> (u16, u16) {
    let cursor = u16::try_from(cursor).unwrap_or(u16::MAX);
    let last_col = inner_width.saturating_sub(1);
    let scroll = cursor.saturating_sub(last_col);
    (scroll, cursor - scroll)
}
