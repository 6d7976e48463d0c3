use crate::ports::outbound::StatusReporter;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// ConsoleStatusReporter adapter writing status lines to stdout
///
/// Success lines are green and warnings yellow when stdout is a terminal.
pub struct ConsoleStatusReporter {
    color: bool,
}

impl ConsoleStatusReporter {
    pub fn new() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn paint_success(&self, message: &str) -> String {
        if self.color {
            message.green().to_string()
        } else {
            message.to_string()
        }
    }

    fn paint_warning(&self, message: &str) -> String {
        if self.color {
            message.yellow().to_string()
        } else {
            message.to_string()
        }
    }
}

impl Default for ConsoleStatusReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusReporter for ConsoleStatusReporter {
    fn report(&self, message: &str) {
        println!("{}", message);
    }

    fn report_success(&self, message: &str) {
        println!("{}", self.paint_success(message));
    }

    fn report_warning(&self, message: &str) {
        println!("{}", self.paint_warning(message));
    }
}
