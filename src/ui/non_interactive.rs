//! Plain console UI.

use super::{OutputMode, UserInterface};

/// UI writing plain lines: status to stdout, warnings and errors to stderr.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new console UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_items() {
            println!("{}", msg);
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            println!("  {}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_ui_mode() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);

        ui.set_output_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn non_interactive_ui_writes_without_panicking() {
        let mut ui = NonInteractiveUI::new(OutputMode::Silent);
        ui.message("hidden");
        ui.detail("hidden");
        ui.success("hidden");
        ui.warning("hidden");
        ui.error("shown");
    }
}
