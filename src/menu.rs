use crate::surface::Key;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    NameEntry,
    Game,
    HighScores,
    ConfirmExit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MainOption {
    StartGame,
    Score,
    ExitGame,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitOption {
    Yes,
    No,
}

pub const MAIN_OPTIONS: &[(MainOption, &str)] = &[
    (MainOption::StartGame, "Start Game"),
    (MainOption::Score, "Score"),
    (MainOption::ExitGame, "Exit Game"),
];

pub const EXIT_OPTIONS: &[(ExitOption, &str)] = &[
    (ExitOption::Yes, "Yes"),
    (ExitOption::No, "No"),
];

/// Vertical list with a wrapping cursor.
pub struct Menu<T: Copy + 'static> {
    options: &'static [(T, &'static str)],
    selected: usize,
}

impl<T: Copy + 'static> Menu<T> {
    pub fn new(options: &'static [(T, &'static str)]) -> Self {
        Menu { options, selected: 0 }
    }

    pub fn options(&self) -> &[(T, &'static str)] {
        self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Moves the cursor on Up/Down; returns the chosen option on Return.
    pub fn handle_key(&mut self, key: Key) -> Option<T> {
        let len = self.options.len();
        match key {
            Key::Up => self.selected = (self.selected + len - 1) % len,
            Key::Down => self.selected = (self.selected + 1) % len,
            Key::Return => return Some(self.options[self.selected].0),
            _ => {}
        }
        None
    }
}

#[derive(Default)]
pub struct NameInput {
    name: String,
}

impl NameInput {
    pub fn new() -> Self {
        NameInput::default()
    }

    pub fn text(&self) -> &str {
        &self.name
    }

    /// Returns true once Return confirms the name.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Return => return true,
            Key::Backspace => { self.name.pop(); },
            Key::Char(c) if !c.is_control() => self.name.push(c),
            _ => {}
        }
        false
    }

    pub fn into_name(self) -> String {
        self.name
    }
}
