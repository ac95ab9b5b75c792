//! Main application logic and the menu loop.
//!
//! The loop reads one menu choice per iteration, runs the matching store
//! operation, and prints the result. Every store error is printed and the
//! loop carries on; only the exit choice or end of input stops it.

use std::io::{self, BufRead, IsTerminal, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use log::debug;

use crate::cli::AppConfig;
use crate::data::{
    format_marks, validate_id, validate_marks, validate_year, LoadOutcome, RecordStore,
    StoreError, StudentUpdate, ValidationError,
};
use crate::ui::{menu, table, MenuChoice, Theme};

/// Result of prompting for a value
enum Input<T> {
    Value(T),
    /// Blank line where blank means "keep the current value"
    Keep,
    /// Input stream ended
    Closed,
}

/// Application state
pub struct App<R, W> {
    store: RecordStore,
    input: R,
    output: W,
    theme: Theme,
    should_quit: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(store: RecordStore, input: R, output: W, theme: Theme) -> Self {
        App {
            store,
            input,
            output,
            theme,
            should_quit: false,
        }
    }

    /// Run until the user picks exit or input runs out
    pub fn run_main_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            self.show_menu()?;

            let Some(line) = self.read_line("Enter your choice (1-5): ")? else {
                break;
            };

            match MenuChoice::parse(&line) {
                Some(choice) => {
                    debug!("menu choice: {choice:?}");
                    self.dispatch(choice)?;
                }
                None => self.say_error("Invalid choice. Please enter a number between 1 and 5.")?,
            }
        }
        Ok(())
    }

    /// Tell the user how startup loading went
    pub fn report_load(&mut self, outcome: &LoadOutcome) -> Result<()> {
        let path = self.store.path().display().to_string();
        match outcome {
            LoadOutcome::Loaded(count) => self.say_success(&format!(
                "Data loaded successfully from {path} ({count} records)."
            )),
            LoadOutcome::Missing => self.say_muted(&format!(
                "No existing data file '{path}' found. Starting with empty records."
            )),
            LoadOutcome::Recovered(err) => {
                self.say_error(&format!("{err}. Starting with empty records."))
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => self.add_student(),
            MenuChoice::View => self.view_students(),
            MenuChoice::Update => self.update_student(),
            MenuChoice::Delete => self.delete_student(),
            MenuChoice::Exit => {
                self.should_quit = true;
                self.say("Exiting Student Record Management System. Goodbye!")
            }
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        self.say("")?;
        self.heading(menu::MENU_TITLE)?;
        for line in menu::menu_lines() {
            self.say(&line)?;
        }
        self.say(&"-".repeat(menu::MENU_TITLE.len()))
    }

    fn add_student(&mut self) -> Result<()> {
        self.heading("\n--- Add New Student ---")?;

        let id = loop {
            let Some(line) = self.read_line("Enter Student ID: ")? else {
                return Ok(());
            };
            match validate_id(&line) {
                Ok(id) if self.store.contains(&id) => {
                    self.say_error(&ValidationError::DuplicateId(id).to_string())?
                }
                Ok(id) => break id,
                Err(err) => self.say_error(&format!("{err} Please try again."))?,
            }
        };

        let Some(name) = self.read_line("Enter Name: ")? else {
            return Ok(());
        };
        let Some(branch) = self.read_line("Enter Branch: ")? else {
            return Ok(());
        };
        let Input::Value(year) =
            self.prompt_number("Enter Year (e.g., 1, 2, 3, 4): ", "year", false, validate_year)?
        else {
            return Ok(());
        };
        let Input::Value(marks) =
            self.prompt_number("Enter Marks (e.g., 85.5): ", "marks", false, validate_marks)?
        else {
            return Ok(());
        };

        let result = self
            .store
            .add(&id, &name, &branch, year, marks)
            .map(|student| student.name.clone());
        match result {
            Ok(name) => {
                self.say_saved()?;
                self.say_success(&format!("Student '{name}' added successfully!"))
            }
            Err(err) => self.report_store_error(&err),
        }
    }

    fn view_students(&mut self) -> Result<()> {
        self.heading("\n--- All Student Records ---")?;
        if self.store.is_empty() {
            return self.say("No student records found.");
        }

        for line in table::render_table(self.store.list_all()) {
            self.say(&line)?;
        }
        Ok(())
    }

    fn update_student(&mut self) -> Result<()> {
        self.heading("\n--- Update Student Record ---")?;

        let Some(id) = self.read_line("Enter Student ID to update: ")? else {
            return Ok(());
        };
        let Some(current) = self.store.find(&id).cloned() else {
            return self.say_error(&StoreError::NotFound(id).to_string());
        };

        self.say(&format!("Found student: {current}"))?;
        self.say("Enter new details (leave blank to keep current value):")?;

        let Some(name) = self.read_line(&format!("Enter new Name ({}): ", current.name))? else {
            return Ok(());
        };
        let Some(branch) = self.read_line(&format!("Enter new Branch ({}): ", current.branch))?
        else {
            return Ok(());
        };
        let mut changes = StudentUpdate::new().name(name).branch(branch);
        match self.prompt_number(
            &format!("Enter new Year ({}): ", current.year),
            "year",
            true,
            validate_year,
        )? {
            Input::Value(year) => changes = changes.year(year),
            Input::Keep => {}
            Input::Closed => return Ok(()),
        }
        match self.prompt_number(
            &format!("Enter new Marks ({}): ", format_marks(current.marks)),
            "marks",
            true,
            validate_marks,
        )? {
            Input::Value(marks) => changes = changes.marks(marks),
            Input::Keep => {}
            Input::Closed => return Ok(()),
        }

        match self.store.update(&id, changes) {
            Ok(report) => {
                for (field, err) in &report.rejected {
                    self.say_error(&format!("Kept current {field}: {err}"))?;
                }
                if report.changed() {
                    self.say_saved()?;
                    self.say_success(&format!("Student with ID '{id}' updated successfully!"))
                } else {
                    self.say_muted(&format!("No changes made to student with ID '{id}'."))
                }
            }
            Err(err) => self.report_store_error(&err),
        }
    }

    fn delete_student(&mut self) -> Result<()> {
        self.heading("\n--- Delete Student Record ---")?;

        let Some(id) = self.read_line("Enter Student ID to delete: ")? else {
            return Ok(());
        };

        match self.store.delete(&id) {
            Ok(_) => {
                self.say_saved()?;
                self.say_success(&format!("Student with ID '{id}' deleted successfully!"))
            }
            Err(err) => self.report_store_error(&err),
        }
    }

    /// Prompt until the line parses as `T` and passes `check`
    fn prompt_number<T: FromStr>(
        &mut self,
        prompt: &str,
        kind: &str,
        allow_keep: bool,
        check: fn(T) -> Result<T, ValidationError>,
    ) -> Result<Input<T>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(Input::Closed);
            };
            if allow_keep && line.is_empty() {
                return Ok(Input::Keep);
            }

            match line.parse::<T>().map(check) {
                Ok(Ok(value)) => return Ok(Input::Value(value)),
                Ok(Err(err)) => self.say_error(&err.to_string())?,
                Err(_) => {
                    self.say_error(&format!("Invalid input for {kind}. Please enter a number."))?
                }
            }
        }
    }

    /// Print `prompt` and read one trimmed line. `None` means input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;

        let mut buf = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut buf)
            .context("Failed to read input")?;
        if read == 0 {
            debug!("input closed");
            self.should_quit = true;
            self.say("")?;
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD and fail validation like any other bad input
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    fn report_store_error(&mut self, err: &StoreError) -> Result<()> {
        self.say_error(&err.to_string())?;
        if matches!(err, StoreError::Persistence { .. }) {
            self.say_warning(
                "The change is kept in memory and will be written on the next successful save.",
            )?;
        }
        Ok(())
    }

    fn say_saved(&mut self) -> Result<()> {
        let path = self.store.path().display().to_string();
        self.say_muted(&format!("Data saved successfully to {path}."))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("Failed to write output")
    }

    fn heading(&mut self, text: &str) -> Result<()> {
        let line = self.theme.heading(text);
        self.say(&line)
    }

    fn say_success(&mut self, text: &str) -> Result<()> {
        let line = self.theme.success(text);
        self.say(&line)
    }

    fn say_error(&mut self, text: &str) -> Result<()> {
        let line = self.theme.error(text);
        self.say(&line)
    }

    fn say_warning(&mut self, text: &str) -> Result<()> {
        let line = self.theme.warning(text);
        self.say(&line)
    }

    fn say_muted(&mut self, text: &str) -> Result<()> {
        let line = self.theme.muted(text);
        self.say(&line)
    }
}

/// Run the console application on stdin/stdout
pub fn run(config: AppConfig) -> Result<()> {
    let stdout = io::stdout();
    let theme = if config.color && stdout.is_terminal() {
        Theme::default()
    } else {
        Theme::plain()
    };

    let (store, outcome) = RecordStore::open(config.data_file);

    let mut app = App::new(store, io::stdin().lock(), stdout.lock(), theme);
    app.report_load(&outcome)?;
    app.run_main_loop()
}
