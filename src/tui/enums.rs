//! Enumerations for menu state management.

/// Entries of the main menu, in display order.
pub const MENU_ITEMS: [&str; 7] = [
    "Add Task",
    "View Tasks",
    "Mark Task as Complete",
    "Delete Task",
    "Edit Task Description",
    "Sort Tasks by Priority",
    "Exit",
];

/// What an entered task id will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdAction {
    Complete,
    Delete,
    Edit,
}

impl IdAction {
    /// Dialog title, matching the menu entry that opened it.
    pub fn title(self) -> &'static str {
        match self {
            IdAction::Complete => MENU_ITEMS[2],
            IdAction::Delete => MENU_ITEMS[3],
            IdAction::Edit => MENU_ITEMS[4],
        }
    }

    /// Prompt shown above the id field.
    pub fn prompt(self) -> &'static str {
        match self {
            IdAction::Complete => "Enter task ID to mark as complete:",
            IdAction::Delete => "Enter task ID to delete:",
            IdAction::Edit => "Enter task ID to edit:",
        }
    }
}

/// Screen currently shown by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    AddDescription,
    AddPriority,
    TaskList,
    SortedList,
    EnterId(IdAction),
    EditDescription(u64),
}

impl MenuState {
    /// Whether this screen takes free text input.
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            MenuState::AddDescription
                | MenuState::AddPriority
                | MenuState::EnterId(_)
                | MenuState::EditDescription(_)
        )
    }
}
