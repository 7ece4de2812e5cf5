use console::style;
use serde_json::Value;
use std::fmt::Display;

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
    pretty: bool,
}

impl OutputWriter {
    pub fn new(json: bool, pretty: bool) -> Self {
        Self {
            format: if json { OutputFormat::Json } else { OutputFormat::Human },
            pretty,
        }
    }

    pub fn success(&self, message: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("{} {}", style("✓").green().bold(), message);
        }
    }

    /// Print a result document. In human mode the document follows a styled
    /// status line; in JSON mode it is the entire output.
    pub fn value(&self, value: &Value) {
        println!("{}", self.render(value));
    }

    fn render(&self, value: &Value) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).expect("value serializes")
        } else {
            serde_json::to_string(value).expect("value serializes")
        }
    }
}
