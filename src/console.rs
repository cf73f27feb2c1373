//! Console output formatting with ANSI color support.
//!
//! Step-by-step progress of a run goes here; diagnostics go to `tracing`.
//! Colors are skipped when stdout is not a TTY or `NO_COLOR` is set.

use serde_json::Value;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

/// ANSI style codes for terminal formatting.
#[derive(Debug, Clone, Copy)]
pub enum Style {
    Bold,
    Dim,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Bold => "1",
            Style::Dim => "2",
            Style::Red => "31",
            Style::Green => "32",
            Style::Yellow => "33",
            Style::Blue => "34",
            Style::Magenta => "35",
            Style::Cyan => "36",
            Style::Gray => "90",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Where run artifacts (response, post content, post text) are written.
#[derive(Debug, Clone)]
enum ArtifactSink {
    Stdout,
    Stderr,
    Buffer(Arc<Mutex<Vec<u8>>>),
}

/// Console output handler.
#[derive(Debug)]
pub struct Console {
    colors_enabled: bool,
    quiet: bool,
    artifacts: ArtifactSink,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Creates a console, detecting color support.
    pub fn new() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal();

        Self {
            colors_enabled,
            quiet: false,
            artifacts: ArtifactSink::Stdout,
        }
    }

    /// Creates a Console with colors explicitly enabled or disabled.
    pub fn with_colors(enabled: bool) -> Self {
        Self {
            colors_enabled: enabled,
            quiet: false,
            artifacts: ArtifactSink::Stdout,
        }
    }

    /// Creates a console for function-style invocations.
    ///
    /// Step messages are dropped and run artifacts go to stderr, since
    /// stdout carries the response document.
    pub fn quiet() -> Self {
        Self {
            colors_enabled: false,
            quiet: true,
            artifacts: ArtifactSink::Stderr,
        }
    }

    /// Creates a quiet console whose run artifacts are appended to `buffer`.
    pub fn capturing(buffer: Arc<Mutex<Vec<u8>>>) -> Self {
        Self {
            colors_enabled: false,
            quiet: true,
            artifacts: ArtifactSink::Buffer(buffer),
        }
    }

    /// Applies ANSI styles to text if colors are enabled.
    pub fn style(&self, text: &str, styles: &[Style]) -> String {
        if !self.colors_enabled || styles.is_empty() {
            return text.to_string();
        }

        let codes: Vec<&str> = styles.iter().map(|s| s.code()).collect();
        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }

    /// Creates a colored label like `[INFO]`.
    pub fn label(&self, label: &str, color: Style) -> String {
        let styled = self.style(label, &[color, Style::Bold]);
        format!("[{}]", styled)
    }

    fn emit(&self, label: &str, color: Style, message: &str) {
        if !self.quiet {
            println!("{} {}", self.label(label, color), message);
        }
    }

    pub fn info(&self, message: &str) {
        self.emit("INFO", Style::Blue, message);
    }

    pub fn success(&self, message: &str) {
        self.emit("OK", Style::Green, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit("WARN", Style::Yellow, message);
    }

    pub fn step(&self, message: &str) {
        self.emit("STEP", Style::Cyan, message);
    }

    /// Prints an error message to stderr. Never silenced.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.label("ERROR", Style::Red), message);
    }

    /// Prints a section header in magenta bold.
    pub fn section(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", self.style(message, &[Style::Magenta, Style::Bold]));
    }

    /// Pretty-prints a JSON document under a muted heading.
    ///
    /// Artifacts are written in quiet mode too.
    pub fn dump(&self, title: &str, value: &Value) {
        let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        self.write_artifact(&format!("{}\n{}", self.heading(title), rendered));
    }

    /// Prints multi-line text indented under a muted heading.
    pub fn block(&self, title: &str, text: &str) {
        let mut out = self.heading(title);
        for line in text.lines() {
            out.push_str("\n  ");
            out.push_str(line);
        }
        self.write_artifact(&out);
    }

    fn heading(&self, title: &str) -> String {
        self.muted(&format!("── {} ──", title))
    }

    fn write_artifact(&self, text: &str) {
        match &self.artifacts {
            ArtifactSink::Stdout => println!("{}", text),
            ArtifactSink::Stderr => eprintln!("{}", text),
            ArtifactSink::Buffer(buffer) => {
                if let Ok(mut buffer) = buffer.lock() {
                    let _ = writeln!(buffer, "{}", text);
                }
            }
        }
    }

    /// Returns text styled as muted (dim gray).
    pub fn muted(&self, text: &str) -> String {
        self.style(text, &[Style::Gray, Style::Dim])
    }

    /// Highlights a value such as the word of the day.
    pub fn highlight(&self, text: &str) -> String {
        self.style(text, &[Style::Green, Style::Bold])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_disabled() {
        let console = Console::with_colors(false);
        assert_eq!(console.style("hello", &[Style::Red]), "hello");
    }

    #[test]
    fn test_style_enabled() {
        let console = Console::with_colors(true);
        let styled = console.style("rapport", &[Style::Green, Style::Bold]);
        assert!(styled.starts_with("\x1b[32;1m"));
        assert!(styled.contains("rapport"));
        assert!(styled.ends_with(RESET));
    }

    #[test]
    fn test_label() {
        let console = Console::with_colors(false);
        assert_eq!(console.label("STEP", Style::Cyan), "[STEP]");
    }

    #[test]
    fn test_capturing_console_keeps_artifacts() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let console = Console::capturing(buffer.clone());

        console.step("not an artifact");
        console.dump("Post content", &serde_json::json!({"word": "rapport"}));
        console.block("Post text", "line one\nline two");

        let out = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(!out.contains("not an artifact"));
        assert!(out.contains("── Post content ──"));
        assert!(out.contains("\"word\": \"rapport\""));
        assert!(out.contains("── Post text ──\n  line one\n  line two"));
    }

    #[test]
    fn test_quiet_console_never_colors() {
        let console = Console::quiet();
        assert_eq!(console.highlight("word"), "word");
    }
}
