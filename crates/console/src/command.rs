//! REPL command parsing.
//!
//! Lines are tokenized with double-quote support (`set notes "wet
//! track"`), then matched against the command table. Parsing is pure so
//! the whole surface is unit-testable.

use std::path::PathBuf;

use paddock_client::UpdateMode;
use paddock_core::types::DbId;

/// One editable field of the draft form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Car,
    Driver,
    EventType,
    Notes,
}

impl DraftField {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "car" => Some(Self::Car),
            "driver" => Some(Self::Driver),
            "event" | "event_type" => Some(Self::EventType),
            "notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

/// A parsed user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    Search(String),
    Upload(PathBuf),
    View(DbId),
    Edit(DbId),
    Set { field: DraftField, value: String },
    Save(UpdateMode),
    Delete(DbId),
    Confirm,
    Map(DbId),
    Download { id: DbId, dir: Option<PathBuf> },
    Summary,
    Close,
    Help,
    Quit,
}

/// Help text printed for `help` and unknown commands.
pub const HELP: &str = "\
commands:
  list                      refresh the log collection
  search [text]             filter the table (no text clears the filter)
  upload <path>             upload a .mcap recording
  view <id>                 show one log's details
  edit <id>                 open the edit form for one log
  set <field> <value>       change a draft field (car|driver|event|notes)
  save [put]                submit the draft (PATCH, or PUT for full replace)
  delete <id>               ask to delete a log
  confirm                   perform the pending delete
  map <id>                  show the track preview
  download <id> [dir]       save the original recording
  summary                   fetch the parse summary
  close                     close the open dialog
  quit                      exit";

/// Parse one input line.
///
/// Returns `Err` with a usage message for unknown commands or malformed
/// arguments; blank lines are the caller's concern.
pub fn parse(line: &str) -> Result<Command, String> {
    let tokens = tokenize(line);
    let Some(head) = tokens.first() else {
        return Err("empty command".into());
    };

    match head.as_str() {
        "list" | "refresh" => Ok(Command::Refresh),
        "search" => Ok(Command::Search(tokens[1..].join(" "))),
        "upload" => {
            let path = expect_arg(&tokens, 1, "upload <path>")?;
            Ok(Command::Upload(PathBuf::from(path)))
        }
        "view" => Ok(Command::View(expect_id(&tokens, "view <id>")?)),
        "edit" => Ok(Command::Edit(expect_id(&tokens, "edit <id>")?)),
        "set" => {
            let field_token = expect_arg(&tokens, 1, "set <field> <value>")?;
            let field = DraftField::parse(field_token)
                .ok_or_else(|| format!("unknown field '{field_token}' (car|driver|event|notes)"))?;
            Ok(Command::Set {
                field,
                value: tokens[2..].join(" "),
            })
        }
        "save" => match tokens.get(1).map(String::as_str) {
            None => Ok(Command::Save(UpdateMode::Patch)),
            Some("put") => Ok(Command::Save(UpdateMode::Put)),
            Some(other) => Err(format!("usage: save [put], got '{other}'")),
        },
        "delete" => Ok(Command::Delete(expect_id(&tokens, "delete <id>")?)),
        "confirm" => Ok(Command::Confirm),
        "map" => Ok(Command::Map(expect_id(&tokens, "map <id>")?)),
        "download" => Ok(Command::Download {
            id: expect_id(&tokens, "download <id> [dir]")?,
            dir: tokens.get(2).map(PathBuf::from),
        }),
        "summary" => Ok(Command::Summary),
        "close" | "cancel" => Ok(Command::Close),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn expect_arg<'a>(tokens: &'a [String], index: usize, usage: &str) -> Result<&'a str, String> {
    tokens
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("usage: {usage}"))
}

fn expect_id(tokens: &[String], usage: &str) -> Result<DbId, String> {
    let raw = expect_arg(tokens, 1, usage)?;
    raw.parse::<DbId>()
        .map_err(|_| format!("expected a numeric id, got '{raw}'"))
}

/// Split a line into tokens, honoring double quotes.
///
/// A `""` escape inside a quoted token produces a literal quote.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                    tokens.push(current.clone());
                    current.clear();
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(current.clone());
                current.clear();
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() || in_quotes {
        tokens.push(current);
    }
    tokens
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
