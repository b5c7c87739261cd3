// ABOUTME: Console front end for roster: environment configuration and the interactive menu.
// ABOUTME: The menu works over any BufRead/Write pair so it can be driven by scripts in tests.

pub mod config;
pub mod menu;

pub use config::{ConfigError, DEFAULT_DATA_FILE, RosterConfig};
pub use menu::{Menu, MenuError, MenuOptions};
