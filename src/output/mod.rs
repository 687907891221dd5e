//! Notification sink for the hosting platform.
//!
//! Emits GitHub Actions workflow commands on stdout: error annotations
//! anchored to a file location, warnings, and collapsible log groups.

use std::fmt;

/// Source location an annotation is anchored to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLocation {
    pub file: String,
    pub line: u32,
    pub col: u32,
}

impl AnnotationLocation {
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, col: u32) -> Self {
        Self {
            file: file.into(),
            line,
            col,
        }
    }
}

/// A structured failure annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub location: AnnotationLocation,
    pub message: String,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "::error file={},line={},col={}::{}",
            escape_property(&self.location.file),
            self.location.line,
            self.location.col,
            escape_data(&self.message)
        )
    }
}

/// Emit a failure annotation.
pub fn error(annotation: &Annotation) {
    println!("{annotation}");
}

/// Emit a warning line.
pub fn warning(message: &str) {
    println!("::warning::{}", escape_data(message));
}

/// Open a collapsible log group.
pub fn group(name: &str) {
    println!("::group::{}", escape_data(name));
}

/// Close the current log group.
pub fn end_group() {
    println!("::endgroup::");
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
