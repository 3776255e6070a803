//! Colored terminal output. Errors go to stderr, everything else to stdout.

use console::style;
use std::fmt::Display;

pub fn error(message: impl Display) {
    eprintln!("{}", style(message).for_stderr().red().bold());
}

pub fn hint(message: impl Display) {
    println!("{}", style(message).yellow());
}

pub fn action(message: impl Display) {
    println!("{}", style(message).cyan());
}

pub fn plain(message: impl Display) {
    println!("{}", message);
}
