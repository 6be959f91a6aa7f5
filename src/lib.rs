#![allow(clippy::module_inception)]

use std::{path::PathBuf, rc::Rc};

use crate::{
    driver::config::Config,
    errors::errors::{Error, ErrorTip},
};

pub mod ast;
pub mod cli;
pub mod compiler;
pub mod driver;
pub mod errors;
pub mod ir;
pub mod lexer;
pub mod macros;
pub mod parser;

/// Byte offset into a source file, along with the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub usize, pub Rc<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line holding byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset within the
/// line. An offset at the end of the input maps to the end of the last line.
/// `None` if the offset lies past the end.
pub fn get_line_at_position(content: &str, position: usize) -> Option<(usize, String, usize)> {
    if position > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return Some((line_number, line.to_string(), position - start));
        }

        let visible = line.trim_end_matches(['\n', '\r']).len();
        last = (line_number, line.to_string(), visible);

        start = end;
        line_number += 1;
    }

    Some(last)
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}

/// Renders a compile error against its source.
///
/// ```text
/// Error: UnrecognisedToken
/// -> main.py
///   |
/// 2 | y = $
///   | ----^
/// ```
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    let mut output = match error.get_tip() {
        ErrorTip::None => format!("Error: {}\n", error.get_error_name()),
        tip => format!("Error: {} ({})\n", error.get_error_name(), tip),
    };
    output.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0) else {
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let visible = line_text_removed.trim_end();

    // Errors inside the indentation point at the first visible character
    let column = line_pos.saturating_sub(removed_whitespace);
    let arrows = line_text_removed
        .get(..column)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(column)
        + 1;

    output.push_str(&format!("{:>padding$}\n", "|"));
    output.push_str(&format!("{} | {}\n", line_string, visible));
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

/// Transpiles Python source to the text of a Rust program.
pub fn transpile(source: &str, file: &str) -> Result<String, Error> {
    driver::compile_source(source, file, &Config::new(PathBuf::from(file)))
}
