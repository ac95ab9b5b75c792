//! Main menu entries and choice parsing.

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    /// All entries in display order; the position plus one is the number the user types
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Add,
        MenuChoice::View,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Exit,
    ];

    /// Parse a raw input line such as `"3"` or `" 5 \n"`
    pub fn parse(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add New Student",
            MenuChoice::View => "View All Students",
            MenuChoice::Update => "Update Student Record",
            MenuChoice::Delete => "Delete Student Record",
            MenuChoice::Exit => "Exit",
        }
    }
}

pub const MENU_TITLE: &str = "--- Student Record Management System ---";

/// The numbered menu lines, without the title
pub fn menu_lines() -> Vec<String> {
    MenuChoice::ALL
        .iter()
        .enumerate()
        .map(|(idx, choice)| format!("{}. {}", idx + 1, choice.label()))
        .collect()
}
