use profile_core::{Affiliation, CareerStage};

use super::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Name(String),
    Affiliation(Affiliation),
    Stage(CareerStage),
    /// Submit the form, optionally replacing the name first.
    Search(Option<String>),
    /// 1-based candidate index.
    Select(usize),
    Show,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Unknown(String),
    BadAffiliation(String),
    BadStage(String),
    BadIndex(String),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Unknown(word) => {
                write!(f, "Unknown command '{word}'. Type '{CMD_HELP}' for commands.")
            }
            InputError::BadAffiliation(raw) => write!(
                f,
                "Unknown affiliation '{raw}'. Choose one of: {}",
                join(Affiliation::ALL.iter().map(|a| a.wire_value()))
            ),
            InputError::BadStage(raw) => write!(
                f,
                "Unknown stage '{raw}'. Choose one of: {}",
                join(CareerStage::ALL.iter().map(|s| s.wire_value()))
            ),
            InputError::BadIndex(raw) => write!(f, "'{raw}' is not a candidate number"),
        }
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

pub fn parse(line: &str) -> Result<UiCommand, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(UiCommand::Empty);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        CMD_NAME => Ok(UiCommand::Name(rest.to_string())),
        CMD_AFFILIATION => Affiliation::parse(rest)
            .map(UiCommand::Affiliation)
            .ok_or_else(|| InputError::BadAffiliation(rest.to_string())),
        CMD_STAGE => CareerStage::parse(rest)
            .map(UiCommand::Stage)
            .ok_or_else(|| InputError::BadStage(rest.to_string())),
        CMD_SEARCH => Ok(UiCommand::Search(
            (!rest.is_empty()).then(|| rest.to_string()),
        )),
        CMD_SELECT => match rest.parse::<usize>() {
            Ok(index) if index > 0 => Ok(UiCommand::Select(index)),
            _ => Err(InputError::BadIndex(rest.to_string())),
        },
        CMD_SHOW => Ok(UiCommand::Show),
        CMD_HELP | "?" => Ok(UiCommand::Help),
        CMD_QUIT | "exit" => Ok(UiCommand::Quit),
        _ => Err(InputError::Unknown(word.to_string())),
    }
}
