// ABOUTME: Interactive text menu that drives a RecordManager over any line-based input and output.
// ABOUTME: Prompts for fields, reports store and file errors inline, and saves once more on exit.

use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;

use roster_core::record::{MAX_ID_LEN, MAX_SCORE_LEN};
use roster_core::{
    Field, RecordKey, SCORE_COUNT, StoreError, ValidationError, render_detail, render_table,
};
use roster_store::{ManagerError, RecordManager, is_storable};
use thiserror::Error;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Errors that end the menu loop. Record and file errors are shown to the
/// user and never surface here; only a broken terminal does.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),
}

/// Presentation switches for the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOptions {
    /// Wait for Enter after each action.
    pub pause: bool,
    /// Clear the terminal before each menu.
    pub clear_screen: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            pause: true,
            clear_screen: true,
        }
    }
}

/// What the main loop does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Done,
    Back,
    Exit,
}

/// The student management menu.
pub struct Menu<'a, R, W> {
    manager: &'a mut RecordManager,
    input: R,
    output: W,
    options: MenuOptions,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(manager: &'a mut RecordManager, input: R, output: W, options: MenuOptions) -> Self {
        Self {
            manager,
            input,
            output,
            options,
        }
    }

    /// Consume the menu and hand back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Load the backing file, run the menu until Exit or end of input, then
    /// save the store one final time.
    pub fn run(&mut self) -> Result<(), MenuError> {
        self.clear()?;
        writeln!(self.output, "Welcome to Student Management System")?;
        self.load()?;
        self.pause()?;

        loop {
            self.clear()?;
            self.show_menu(
                "Student Management System",
                &[
                    "Add Student",
                    "Delete Student",
                    "Modify Student",
                    "Find Student",
                    "Sort Students",
                    "Print Student List",
                    "Exit",
                ],
            )?;
            let Some(line) = self.read_line()? else {
                break;
            };
            self.clear()?;

            let flow = match line.trim().parse::<u32>() {
                Ok(1) => self.add_student()?,
                Ok(2) => self.delete_student()?,
                Ok(3) => self.modify_student()?,
                Ok(4) => self.find_student()?,
                Ok(5) => self.sort_students()?,
                Ok(6) => {
                    self.print_table()?;
                    Flow::Done
                }
                Ok(7) => break,
                Ok(_) => self.invalid_choice()?,
                Err(_) => {
                    writeln!(self.output, "Invalid input. Please enter a number.")?;
                    Flow::Done
                }
            };

            match flow {
                Flow::Done => self.pause()?,
                Flow::Back => {}
                Flow::Exit => break,
            }
        }

        writeln!(self.output, "Exiting program...")?;
        self.save()?;
        self.output.flush()?;
        Ok(())
    }

    fn load(&mut self) -> Result<(), MenuError> {
        writeln!(
            self.output,
            "Loading data from {}...",
            self.manager.path().display()
        )?;
        match self.manager.load() {
            Ok(count) => writeln!(
                self.output,
                "Data loaded from {} ({} students).",
                self.manager.path().display(),
                count
            )?,
            Err(err) => writeln!(self.output, "Error: {}", err)?,
        }
        Ok(())
    }

    fn save(&mut self) -> Result<(), MenuError> {
        match self.manager.save() {
            Ok(()) => writeln!(
                self.output,
                "Data saved to {}.",
                self.manager.path().display()
            )?,
            Err(err) => {
                tracing::warn!("final save failed: {}", err);
                writeln!(self.output, "Error: {}", err)?
            }
        }
        Ok(())
    }

    fn add_student(&mut self) -> Result<Flow, MenuError> {
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(id) = self.prompt("Enter ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(department) = self.prompt("Enter department: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(major) = self.prompt("Enter major: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(scores) = self.prompt("Enter scores (5 courses): ")? else {
            return Ok(Flow::Exit);
        };

        let (name, department, major) = (name.trim(), department.trim(), major.trim());
        if !self.single_words(&[("name", name), ("department", department), ("major", major)])? {
            return Ok(Flow::Done);
        }
        let Some(id) = self.parse_id(&id)? else {
            return Ok(Flow::Done);
        };
        let scores = match parse_scores(&scores) {
            Ok(scores) => scores,
            Err(msg) => return self.error(msg),
        };

        let result = self.manager.add(
            name.to_string(),
            id,
            department.to_string(),
            major.to_string(),
            &scores,
        );
        self.report(result, "Student added successfully.")?;
        Ok(Flow::Done)
    }

    fn delete_student(&mut self) -> Result<Flow, MenuError> {
        let choice = match self.choose("Delete Student", &["Delete by Name", "Delete by ID"])? {
            Ok(choice) => choice,
            Err(flow) => return Ok(flow),
        };
        self.clear()?;

        let result = match choice {
            1 => {
                let Some(name) = self.prompt("Enter name: ")? else {
                    return Ok(Flow::Exit);
                };
                self.manager.delete_by_name(name.trim())
            }
            2 => {
                let Some(id) = self.prompt("Enter ID: ")? else {
                    return Ok(Flow::Exit);
                };
                let Some(id) = self.parse_id(&id)? else {
                    return Ok(Flow::Done);
                };
                self.manager.delete_by_id(id)
            }
            3 => return Ok(Flow::Back),
            _ => return self.invalid_choice(),
        };

        self.report(result, "Student deleted successfully.")?;
        Ok(Flow::Done)
    }

    fn modify_student(&mut self) -> Result<Flow, MenuError> {
        let choice = match self.choose("Modify Student", &["Modify by Name", "Modify by ID"])? {
            Ok(choice) => choice,
            Err(flow) => return Ok(flow),
        };
        self.clear()?;

        let key = match choice {
            1 => {
                let Some(name) = self.prompt("Enter name: ")? else {
                    return Ok(Flow::Exit);
                };
                RecordKey::Name(name.trim().to_string())
            }
            2 => {
                let Some(id) = self.prompt("Enter ID: ")? else {
                    return Ok(Flow::Exit);
                };
                let Some(id) = self.parse_id(&id)? else {
                    return Ok(Flow::Done);
                };
                RecordKey::Id(id)
            }
            3 => return Ok(Flow::Back),
            _ => return self.invalid_choice(),
        };

        let Some(department) = self.prompt("Enter new department: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(major) = self.prompt("Enter new major: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(scores) = self.prompt("Enter new scores (5 courses): ")? else {
            return Ok(Flow::Exit);
        };
        let (department, major) = (department.trim(), major.trim());
        if !self.single_words(&[("department", department), ("major", major)])? {
            return Ok(Flow::Done);
        }
        let scores = match parse_fixed_scores(&scores) {
            Ok(scores) => scores,
            Err(msg) => return self.error(msg),
        };

        let department = department.to_string();
        let major = major.to_string();
        let result = match &key {
            RecordKey::Name(name) => self.manager.modify_by_name(name, department, major, scores),
            RecordKey::Id(id) => self.manager.modify_by_id(*id, department, major, scores),
        };
        self.report(result, "Student modified successfully.")?;
        Ok(Flow::Done)
    }

    fn find_student(&mut self) -> Result<Flow, MenuError> {
        let choice = match self.choose("Find Student", &["Find by Name", "Find by ID"])? {
            Ok(choice) => choice,
            Err(flow) => return Ok(flow),
        };
        self.clear()?;

        let key = match choice {
            1 => {
                let Some(name) = self.prompt("Enter name: ")? else {
                    return Ok(Flow::Exit);
                };
                RecordKey::Name(name.trim().to_string())
            }
            2 => {
                let Some(id) = self.prompt("Enter ID: ")? else {
                    return Ok(Flow::Exit);
                };
                let Some(id) = self.parse_id(&id)? else {
                    return Ok(Flow::Done);
                };
                RecordKey::Id(id)
            }
            3 => return Ok(Flow::Back),
            _ => return self.invalid_choice(),
        };

        let text = match self.manager.store().find(&key) {
            Some(record) => render_detail(record),
            None => format!("Error: {}\n", StoreError::NotFound(key)),
        };
        write!(self.output, "{}", text)?;
        Ok(Flow::Done)
    }

    fn sort_students(&mut self) -> Result<Flow, MenuError> {
        let choice = match self.choose(
            "Sort Students",
            &[
                "Sort by ID",
                "Sort by Total Score",
                "Sort by Individual Course Score",
            ],
        )? {
            Ok(choice) => choice,
            Err(flow) => return Ok(flow),
        };
        self.clear()?;

        match choice {
            1 => {
                self.manager.sort_by_id();
                writeln!(self.output, "Students sorted by ID.")?;
                self.print_table()?;
                Ok(Flow::Done)
            }
            2 => {
                let direction = match self.choose_direction("Sort by Total Score")? {
                    Ok(direction) => direction,
                    Err(flow) => return Ok(flow),
                };
                let ascending = match direction {
                    1 => true,
                    2 => false,
                    3 => return Ok(Flow::Back),
                    _ => return self.invalid_choice(),
                };
                self.manager.sort_by_total_score(ascending);
                writeln!(
                    self.output,
                    "Students sorted by total score ({}).",
                    direction_label(ascending)
                )?;
                self.print_table()?;
                Ok(Flow::Done)
            }
            3 => {
                let direction = match self.choose_direction("Sort by Individual Course Score")? {
                    Ok(direction) => direction,
                    Err(flow) => return Ok(flow),
                };
                let ascending = match direction {
                    1 => true,
                    2 => false,
                    3 => return Ok(Flow::Back),
                    _ => return self.invalid_choice(),
                };
                self.clear()?;
                let Some(course) = self.prompt("Enter course index (1-5): ")? else {
                    return Ok(Flow::Exit);
                };
                let Ok(course) = course.trim().parse::<usize>() else {
                    writeln!(self.output, "Invalid input. Please enter a number.")?;
                    return Ok(Flow::Done);
                };
                match self.manager.sort_by_course(course, ascending) {
                    Ok(()) => {
                        writeln!(
                            self.output,
                            "Students sorted by course {} score ({}):",
                            course,
                            direction_label(ascending)
                        )?;
                        self.print_table()?;
                    }
                    Err(err) => writeln!(self.output, "Error: {}", err)?,
                }
                Ok(Flow::Done)
            }
            4 => Ok(Flow::Back),
            _ => self.invalid_choice(),
        }
    }

    fn print_table(&mut self) -> Result<(), MenuError> {
        let table = render_table(self.manager.store().records());
        write!(self.output, "{}", table)?;
        Ok(())
    }

    fn report(&mut self, result: Result<(), ManagerError>, success: &str) -> Result<(), MenuError> {
        match result {
            Ok(()) => {
                writeln!(self.output, "{}", success)?;
                writeln!(
                    self.output,
                    "Data saved to {}.",
                    self.manager.path().display()
                )?;
            }
            Err(ManagerError::Codec(err)) => writeln!(
                self.output,
                "Error: {} (the change was applied in memory but not saved)",
                err
            )?,
            Err(err) => writeln!(self.output, "Error: {}", err)?,
        }
        Ok(())
    }

    /// Check that each labelled text field is a single non-empty word, since
    /// the backing file separates fields by whitespace. Prints an error for
    /// the first one that is not.
    fn single_words(&mut self, fields: &[(&str, &str)]) -> Result<bool, MenuError> {
        for (label, value) in fields {
            if !is_storable(value) {
                writeln!(
                    self.output,
                    "Error: {} must be a single word without spaces, got {:?}",
                    label, value
                )?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn error(&mut self, message: String) -> Result<Flow, MenuError> {
        writeln!(self.output, "Error: {}", message)?;
        Ok(Flow::Done)
    }

    fn invalid_choice(&mut self) -> Result<Flow, MenuError> {
        writeln!(self.output, "Invalid choice.")?;
        Ok(Flow::Done)
    }

    /// Parse an id, printing an error and returning `None` when it is not
    /// an integer. A number too large for an id is reported as too long.
    fn parse_id(&mut self, text: &str) -> Result<Option<i64>, MenuError> {
        let text = text.trim();
        match text.parse::<i64>() {
            Ok(id) => Ok(Some(id)),
            Err(err) if is_overflow(err.kind()) => {
                let err = ValidationError::FieldTooLong {
                    field: Field::Id,
                    len: text.len(),
                    limit: MAX_ID_LEN,
                };
                writeln!(self.output, "Error: {}", err)?;
                Ok(None)
            }
            Err(_) => {
                writeln!(self.output, "Error: ID must be a whole number, got {:?}", text)?;
                Ok(None)
            }
        }
    }

    /// Show a numbered sub-menu whose last entry is "Back to Main Menu" and
    /// read a choice. `Err` carries the flow to return instead: `Exit` at end
    /// of input, `Done` after reporting a non-numeric entry.
    fn choose(&mut self, title: &str, items: &[&str]) -> Result<Result<u32, Flow>, MenuError> {
        self.clear()?;
        let mut entries = items.to_vec();
        entries.push("Back to Main Menu");
        self.show_menu(title, &entries)?;
        let Some(line) = self.read_line()? else {
            return Ok(Err(Flow::Exit));
        };
        match line.trim().parse() {
            Ok(choice) => Ok(Ok(choice)),
            Err(_) => {
                writeln!(self.output, "Invalid input. Please enter a number.")?;
                Ok(Err(Flow::Done))
            }
        }
    }

    fn choose_direction(&mut self, title: &str) -> Result<Result<u32, Flow>, MenuError> {
        self.choose(title, &["Ascending", "Descending"])
    }

    fn show_menu(&mut self, title: &str, items: &[&str]) -> Result<(), MenuError> {
        writeln!(self.output, "{}", title)?;
        writeln!(self.output)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, item)?;
        }
        writeln!(self.output)?;
        write!(self.output, "Enter your choice: ")?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>, MenuError> {
        write!(self.output, "{}", label)?;
        self.read_line()
    }

    /// Read one line without its terminator. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, MenuError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn pause(&mut self) -> Result<(), MenuError> {
        if self.options.pause {
            write!(self.output, "Press Enter to continue...")?;
            self.read_line()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), MenuError> {
        if self.options.clear_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
        }
        Ok(())
    }
}

fn direction_label(ascending: bool) -> &'static str {
    if ascending { "ascending" } else { "descending" }
}

fn is_overflow(kind: &IntErrorKind) -> bool {
    matches!(kind, IntErrorKind::PosOverflow | IntErrorKind::NegOverflow)
}

/// Parse every whitespace-separated score on the line. The count is left
/// for the store to judge.
fn parse_scores(text: &str) -> Result<Vec<i32>, String> {
    text.split_whitespace().map(parse_score).collect()
}

fn parse_score(token: &str) -> Result<i32, String> {
    token.parse::<i32>().map_err(|err| {
        if is_overflow(err.kind()) {
            format!("score {} is longer than {} digits", token, MAX_SCORE_LEN)
        } else {
            format!("score {:?} is not a whole number", token)
        }
    })
}

/// Parse exactly five scores.
fn parse_fixed_scores(text: &str) -> Result<[i32; SCORE_COUNT], String> {
    let scores = parse_scores(text)?;
    let found = scores.len();
    scores
        .try_into()
        .map_err(|_| format!("expected {} scores, got {}", SCORE_COUNT, found))
}
