//! Line-oriented command scripts replayed against a directory.
//!
//! ```text
//! # comment
//! open irc freenode.#rust
//! title irc.freenode.#rust Rust talk
//! set 2 notify 1
//! move 2 1
//! list
//! ```
//!
//! A buffer is referenced by number or by `owner.name`; a bare name matches
//! any owner.

use thiserror::Error;

use crate::buffer::{BufferId, Line, PluginId, CORE_OWNER};
use crate::directory::BufferDirectory;
use crate::error::BufferError;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("no buffer matches '{0}'")]
    UnknownBuffer(String),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferRef {
    Number(u32),
    Name { owner: Option<String>, name: String },
}

impl BufferRef {
    pub fn parse(value: &str) -> Self {
        if let Ok(number) = value.parse() {
            return Self::Number(number);
        }
        match value.split_once('.') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Self::Name {
                owner: Some(owner.to_string()),
                name: name.to_string(),
            },
            _ => Self::Name {
                owner: None,
                name: value.to_string(),
            },
        }
    }

    fn resolve(&self, dir: &BufferDirectory) -> Option<BufferId> {
        match self {
            Self::Number(number) => dir.search_by_number(*number),
            Self::Name { owner, name } => dir.search_by_name(owner.as_deref(), Some(name)),
        }
    }
}

impl std::fmt::Display for BufferRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Name {
                owner: Some(owner),
                name,
            } => write!(f, "{owner}.{name}"),
            Self::Name { owner: None, name } => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open { owner: Option<String>, name: String },
    Close(BufferRef),
    Move { buffer: BufferRef, number: u32 },
    Rename { buffer: BufferRef, name: String },
    Title { buffer: BufferRef, title: String },
    Set {
        buffer: Option<BufferRef>,
        property: String,
        value: String,
    },
    /// `None` clears every buffer.
    Clear(Option<BufferRef>),
    Print { buffer: BufferRef, message: String },
    List,
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = parse_line(line).map_err(|message| ScriptError::Parse {
            line: index + 1,
            message,
        })?;
        commands.push(command);
    }
    Ok(commands)
}

fn parse_line(line: &str) -> Result<Command, String> {
    let (verb, rest) = split_word(line);
    let (first, tail) = split_word(rest);
    let command = match verb.to_ascii_lowercase().as_str() {
        "open" => {
            let (owner, name) = if tail.is_empty() {
                (None, first)
            } else {
                (Some(first), tail)
            };
            Command::Open {
                owner: owner.filter(|o| *o != CORE_OWNER).map(str::to_string),
                name: required(name, "buffer name")?.to_string(),
            }
        }
        "close" => Command::Close(buffer_ref(first)?),
        "move" => Command::Move {
            buffer: buffer_ref(first)?,
            number: required(tail, "target number")?
                .parse()
                .map_err(|_| format!("invalid number '{tail}'"))?,
        },
        "rename" => Command::Rename {
            buffer: buffer_ref(first)?,
            name: required(tail, "new name")?.to_string(),
        },
        "title" => Command::Title {
            buffer: buffer_ref(first)?,
            title: tail.to_string(),
        },
        "set" => {
            let (property, value) = split_word(tail);
            Command::Set {
                buffer: (first != "-").then(|| BufferRef::parse(first)),
                property: required(property, "property")?.to_string(),
                value: value.to_string(),
            }
        }
        "clear" => Command::Clear(match first {
            "" | "*" => None,
            reference => Some(BufferRef::parse(reference)),
        }),
        "print" => Command::Print {
            buffer: buffer_ref(first)?,
            message: tail.to_string(),
        },
        "list" => Command::List,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, String> {
    if value.is_empty() {
        Err(format!("missing {what}"))
    } else {
        Ok(value)
    }
}

fn buffer_ref(value: &str) -> Result<BufferRef, String> {
    required(value, "buffer").map(BufferRef::parse)
}

fn resolve(dir: &BufferDirectory, reference: &BufferRef) -> Result<BufferId, ScriptError> {
    reference
        .resolve(dir)
        .ok_or_else(|| ScriptError::UnknownBuffer(reference.to_string()))
}

/// Run `commands` in order; returns what `list` printed.
pub fn run(dir: &mut BufferDirectory, commands: &[Command]) -> Result<Vec<String>, ScriptError> {
    let mut output = Vec::new();
    for command in commands {
        tracing::debug!(?command, "Running script command");
        match command {
            Command::Open { owner, name } => {
                dir.create(owner.as_deref().map(PluginId::new), name, None, None)?;
            }
            Command::Close(reference) => {
                let id = resolve(dir, reference)?;
                dir.close(id, true)?;
            }
            Command::Move { buffer, number } => {
                let id = resolve(dir, buffer)?;
                dir.move_to_number(id, *number)?;
            }
            Command::Rename { buffer, name } => {
                let id = resolve(dir, buffer)?;
                dir.rename(id, name)?;
            }
            Command::Title { buffer, title } => {
                let id = resolve(dir, buffer)?;
                dir.retitle(id, title)?;
            }
            Command::Set {
                buffer,
                property,
                value,
            } => {
                let id = match buffer {
                    Some(reference) => Some(resolve(dir, reference)?),
                    None => None,
                };
                dir.set(id, property, value);
            }
            Command::Clear(Some(reference)) => {
                let id = resolve(dir, reference)?;
                dir.clear(id)?;
            }
            Command::Clear(None) => dir.clear_all(),
            Command::Print { buffer, message } => {
                let id = resolve(dir, buffer)?;
                dir.print_line(id, Line::new(None, message))?;
            }
            Command::List => {
                let current = dir.current_buffer();
                for buffer in dir.registry().iter() {
                    let marker = if Some(buffer.id()) == current { "*" } else { " " };
                    output.push(format!(
                        "{marker}{:>3}. {}",
                        buffer.number(),
                        buffer.full_name()
                    ));
                }
            }
        }
    }
    Ok(output)
}
