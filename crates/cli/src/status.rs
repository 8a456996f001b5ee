//! Colored status lines on stderr, keeping stdout free for data output.

use nu_ansi_term::Color;

pub fn info(message: &str) {
    eprintln!("{}", Color::Yellow.paint(message));
}

pub fn ok(message: &str) {
    eprintln!("{}", Color::Green.paint(message));
}

pub fn err(message: &str) {
    eprintln!("{}", Color::Red.paint(message));
}
