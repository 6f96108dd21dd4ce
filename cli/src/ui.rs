use colored::{ColoredString, Colorize};
use std::io::{self, Write};

fn line(marker: ColoredString, message: ColoredString) {
    println!("{marker} {message}");
}

/// Announce a step that is about to run
pub fn status_message(message: &str) {
    line("⏳".yellow(), format!("{message} ...").bright_white());
    let _ = io::stdout().flush();
}

pub fn success_message(message: &str) {
    line("✅".green(), message.green());
}

pub fn warning_message(message: &str) {
    line("⚠️ ".yellow(), message.yellow());
}

pub fn info_message(message: &str) {
    line("ℹ️ ".blue(), message.blue());
}

/// Banner separating the phases of a command
pub fn section_header(title: &str) {
    println!("\n{}", format!("==== {title} ====").cyan().bold());
}

/// Print one line of a rendered outline, dimming the indentation guide
pub fn outline_line(outline: &str) {
    let text = outline.trim_start();
    let indent = outline.len() - text.len();
    println!("{}{}", "│ ".repeat(indent / 2).dimmed(), text);
}
