//! Store editing commands typed at the REPL.
//!
//! ```text
//! :create NAME a, b, c
//! :insert NAME v1, v2, v3
//! :update NAME INDEX v1, v2, v3
//! :delete NAME INDEX
//! :drop NAME
//! ```
//!
//! Values are given in column order and converted with
//! [`Value::parse_input`]. Tuple indices start at 0.

use crate::relation::{Tuple, Value};
use crate::store::{RelationStore, StoreError};
use thiserror::Error;

/// Errors raised while reading or applying an editing command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Usage: {usage}")]
    Usage { usage: &'static str },

    #[error("Invalid tuple index: {index:?}")]
    InvalidIndex { index: String },

    #[error("Relation {name} has {expected} column(s), got {found} value(s)")]
    ValueCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for editing commands
pub type CommandResult<T> = Result<T, CommandError>;

const CREATE_USAGE: &str = ":create NAME col1, col2, ...";
const INSERT_USAGE: &str = ":insert NAME v1, v2, ...";
const UPDATE_USAGE: &str = ":update NAME INDEX v1, v2, ...";
const DELETE_USAGE: &str = ":delete NAME INDEX";
const DROP_USAGE: &str = ":drop NAME";

/// A parsed editing command
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    Create { name: String, columns: Vec<String> },
    Insert { name: String, values: Vec<Value> },
    Update { name: String, index: usize, values: Vec<Value> },
    Delete { name: String, index: usize },
    Drop { name: String },
}

impl StoreCommand {
    /// Parse a REPL line. `Ok(None)` means the line is not an editing command.
    pub fn parse(line: &str) -> CommandResult<Option<Self>> {
        let line = line.trim();
        let (keyword, rest) = split_word(line);

        let command = match keyword {
            ":create" => {
                let (name, columns) = require_name(rest, CREATE_USAGE)?;
                let columns = split_list(columns);
                if columns.is_empty() {
                    return Err(CommandError::Usage {
                        usage: CREATE_USAGE,
                    });
                }
                StoreCommand::Create { name, columns }
            }
            ":insert" => {
                let (name, values) = require_name(rest, INSERT_USAGE)?;
                StoreCommand::Insert {
                    name,
                    values: parse_values(values),
                }
            }
            ":update" => {
                let (name, rest) = require_name(rest, UPDATE_USAGE)?;
                let (index, values) = split_word(rest);
                StoreCommand::Update {
                    name,
                    index: parse_index(index, UPDATE_USAGE)?,
                    values: parse_values(values),
                }
            }
            ":delete" => {
                let (name, rest) = require_name(rest, DELETE_USAGE)?;
                let (index, extra) = split_word(rest);
                if !extra.is_empty() {
                    return Err(CommandError::Usage {
                        usage: DELETE_USAGE,
                    });
                }
                StoreCommand::Delete {
                    name,
                    index: parse_index(index, DELETE_USAGE)?,
                }
            }
            ":drop" => {
                let (name, extra) = require_name(rest, DROP_USAGE)?;
                if !extra.is_empty() {
                    return Err(CommandError::Usage { usage: DROP_USAGE });
                }
                StoreCommand::Drop { name }
            }
            _ => return Ok(None),
        };

        Ok(Some(command))
    }

    /// Apply the command to the store and describe what changed
    pub fn apply(self, store: &mut RelationStore) -> CommandResult<String> {
        match self {
            StoreCommand::Create { name, columns } => {
                let count = columns.len();
                store.create_relation(&name, columns)?;
                Ok(format!("Created relation {} with {} column(s)", name, count))
            }
            StoreCommand::Insert { name, values } => {
                let tuple = build_tuple(store, &name, values)?;
                store.insert_tuple(&name, tuple)?;
                let len = store.get(&name).map_or(0, |r| r.len());
                Ok(format!("Inserted tuple {} into {}", len - 1, name))
            }
            StoreCommand::Update {
                name,
                index,
                values,
            } => {
                let tuple = build_tuple(store, &name, values)?;
                store.update_tuple(&name, index, tuple)?;
                Ok(format!("Updated tuple {} of {}", index, name))
            }
            StoreCommand::Delete { name, index } => {
                store.delete_tuple(&name, index)?;
                Ok(format!("Deleted tuple {} of {}", index, name))
            }
            StoreCommand::Drop { name } => {
                let relation = store.drop_relation(&name)?;
                Ok(format!(
                    "Dropped relation {} ({} tuple(s))",
                    name,
                    relation.len()
                ))
            }
        }
    }
}

/// Pair values with the relation's columns, in order
fn build_tuple(store: &RelationStore, name: &str, values: Vec<Value>) -> CommandResult<Tuple> {
    let columns = store.columns(name).ok_or_else(|| StoreError::NotFound {
        name: name.to_string(),
    })?;
    if columns.len() != values.len() {
        return Err(CommandError::ValueCount {
            name: name.to_string(),
            expected: columns.len(),
            found: values.len(),
        });
    }
    Ok(Tuple::from_pairs(columns.iter().cloned().zip(values)))
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], text[end..].trim_start()),
        None => (text, ""),
    }
}

fn require_name<'a>(text: &'a str, usage: &'static str) -> CommandResult<(String, &'a str)> {
    let (name, rest) = split_word(text);
    if name.is_empty() {
        return Err(CommandError::Usage { usage });
    }
    Ok((name.to_string(), rest))
}

fn parse_index(text: &str, usage: &'static str) -> CommandResult<usize> {
    if text.is_empty() {
        return Err(CommandError::Usage { usage });
    }
    text.parse().map_err(|_| CommandError::InvalidIndex {
        index: text.to_string(),
    })
}

fn split_list(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|item| item.trim().to_string()).collect()
}

fn parse_values(text: &str) -> Vec<Value> {
    split_list(text)
        .iter()
        .map(|cell| Value::parse_input(cell))
        .collect()
}
