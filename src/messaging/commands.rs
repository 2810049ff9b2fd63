/// Command types for the terminal front-end
///
/// Commands represent requests to perform actions (imperative).
/// They are parsed from input lines and executed by the command executor.
use crate::order::ShippingField;

/// Front-end commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type `raw` into serial row `index` (0-based)
    EditSerial { index: usize, raw: String },

    /// Add an empty serial row
    AddSerial,

    /// Remove serial row `index` (0-based)
    RemoveSerial { index: usize },

    /// Set a shipping field
    SetShippingField { field: ShippingField, value: String },

    /// Submit the current step
    Submit,

    /// Go back one step
    Back,

    /// Continue from the review step
    Continue,

    /// Apply a finished verification, if any
    Refresh,

    /// Acknowledge the current notice
    Acknowledge,

    /// List selectable states
    ListStates,

    /// Start a new order
    NewOrder,

    /// Show command help
    Help,

    /// Quit the application
    Quit,
}

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed successfully
    Success,

    /// Command executed with a specific result
    SuccessWithValue(String),

    /// Command failed with an error
    Error(String),
}

/// Usage text shown for `help` and after a parse error
pub const USAGE: &str = "\
Commands:
  set <row> <text>        type into serial row <row> (1-based)
  add                     add a serial row
  remove <row>            remove serial row <row>
  submit | verify         submit the current step
  back                    go back one step
  continue                continue to shipping
  field <name> <value>    set a shipping field (e.g. field zipCode 12345)
  refresh                 check whether verification finished
  ok                      dismiss the current notice
  states                  list state codes
  new                     start a new order
  help                    show this help
  quit                    exit";

impl Command {
    /// Parse one input line. Row numbers are 1-based on input.
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "set" => {
                let (row, raw) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Command::EditSerial {
                    index: parse_row(row)?,
                    raw: raw.trim().to_string(),
                })
            }
            "add" => Ok(Command::AddSerial),
            "remove" | "rm" => Ok(Command::RemoveSerial {
                index: parse_row(rest)?,
            }),
            "field" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if name.is_empty() {
                    return Err("field needs a name, e.g. field email you@example.com".to_string());
                }
                Ok(Command::SetShippingField {
                    field: name.parse()?,
                    value: value.trim().to_string(),
                })
            }
            "submit" | "verify" => Ok(Command::Submit),
            "back" => Ok(Command::Back),
            "continue" | "next" => Ok(Command::Continue),
            "refresh" | "" => Ok(Command::Refresh),
            "ok" => Ok(Command::Acknowledge),
            "states" => Ok(Command::ListStates),
            "new" => Ok(Command::NewOrder),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {other}")),
        }
    }

    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            Command::EditSerial { index, raw } => {
                format!("Edit serial row {}: {:?}", index + 1, raw)
            }
            Command::AddSerial => "Add serial row".to_string(),
            Command::RemoveSerial { index } => format!("Remove serial row {}", index + 1),
            Command::SetShippingField { field, .. } => format!("Set shipping field {}", field),
            Command::Submit => "Submit".to_string(),
            Command::Back => "Back".to_string(),
            Command::Continue => "Continue".to_string(),
            Command::Refresh => "Refresh".to_string(),
            Command::Acknowledge => "Acknowledge notice".to_string(),
            Command::ListStates => "List states".to_string(),
            Command::NewOrder => "Start new order".to_string(),
            Command::Help => "Show help".to_string(),
            Command::Quit => "Quit application".to_string(),
        }
    }
}

fn parse_row(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(format!("Expected a row number starting at 1, got {:?}", text.trim())),
    }
}
