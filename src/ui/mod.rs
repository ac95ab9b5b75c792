//! Console presentation for student-records.

pub mod menu;
pub mod table;
mod theme;

pub use menu::MenuChoice;
pub use theme::Theme;
