use contracts::dashboards::d001_returns_dashboard::FilterEvent;
use std::collections::BTreeSet;
use std::io::{BufRead, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Stands for "every value" in a selection list.
pub const ALL: &str = "*";

/// Stands for "no person" in a person list.
pub const NO_PERSON: &str = "-";

pub const HELP: &str = "\
commands:
  region A,B     select regions (* = all, empty = none)
  person A,B     select employees (- = rows without one)
  year 2023,2024 select years
  reset          clear every filter
  show           redraw the dashboard
  json PATH      write the snapshot as JSON
  quit";

/// One line typed into the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(FilterEvent),
    Show,
    Json(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help`")]
    Unknown(String),

    #[error("invalid year {0:?}")]
    InvalidYear(String),

    #[error("`json` needs a file path")]
    MissingPath,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "region" | "regions" => Command::Filter(FilterEvent::SetRegions(
            parse_list(rest).map(|items| items.into_iter().collect()),
        )),
        "person" | "persons" | "employee" => Command::Filter(FilterEvent::SetPersons(
            parse_list(rest).map(|items| {
                items
                    .into_iter()
                    .map(|p| if p == NO_PERSON { None } else { Some(p) })
                    .collect()
            }),
        )),
        "year" | "years" => {
            let years = match parse_list(rest) {
                Some(items) => Some(
                    items
                        .into_iter()
                        .map(|y| y.parse::<i32>().map_err(|_| CommandError::InvalidYear(y)))
                        .collect::<Result<BTreeSet<_>, _>>()?,
                ),
                None => None,
            };
            Command::Filter(FilterEvent::SetYears(years))
        }
        "reset" => Command::Filter(FilterEvent::Reset),
        "show" => Command::Show,
        "json" => {
            if rest.is_empty() {
                return Err(CommandError::MissingPath);
            }
            Command::Json(PathBuf::from(rest))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };

    Ok(Some(command))
}

/// Commands read line by line from `input`. Blank lines, lines that are
/// not valid UTF-8 and lines that do not parse are logged and skipped;
/// only a failing reader ends the stream with an error.
pub fn read_commands<R: BufRead>(input: R) -> impl Iterator<Item = std::io::Result<Command>> {
    input.lines().filter_map(|line| {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!("ignoring unreadable input line: {e}");
                return None;
            }
            Err(e) => return Some(Err(e)),
        };
        match parse_command(&line) {
            Ok(command) => command.map(Ok),
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        }
    })
}

/// Comma separated values. `*` means unset (every value); an empty list
/// is an empty selection.
fn parse_list(rest: &str) -> Option<Vec<String>> {
    if rest == ALL {
        return None;
    }
    Some(
        rest.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreeset;

    #[test]
    fn test_filter_commands() {
        assert_eq!(
            parse_command("region East, West").unwrap(),
            Some(Command::Filter(FilterEvent::SetRegions(Some(
                btreeset! {"East".to_string(), "West".to_string()}
            ))))
        );
        assert_eq!(
            parse_command("region *").unwrap(),
            Some(Command::Filter(FilterEvent::SetRegions(None)))
        );
        assert_eq!(
            parse_command("region").unwrap(),
            Some(Command::Filter(FilterEvent::SetRegions(Some(BTreeSet::new()))))
        );
        assert_eq!(
            parse_command("person Anna Andreadi,-").unwrap(),
            Some(Command::Filter(FilterEvent::SetPersons(Some(
                btreeset! {Some("Anna Andreadi".to_string()), None}
            ))))
        );
        assert_eq!(
            parse_command("YEAR 2023,2024").unwrap(),
            Some(Command::Filter(FilterEvent::SetYears(Some(btreeset! {2023, 2024}))))
        );
        assert_eq!(
            parse_command("reset").unwrap(),
            Some(Command::Filter(FilterEvent::Reset))
        );
    }

    #[test]
    fn test_other_commands_and_errors() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert_eq!(
            parse_command("json out/snapshot.json").unwrap(),
            Some(Command::Json(PathBuf::from("out/snapshot.json")))
        );
        assert_eq!(parse_command("json"), Err(CommandError::MissingPath));
        assert_eq!(
            parse_command("year twenty"),
            Err(CommandError::InvalidYear("twenty".into()))
        );
        assert_eq!(
            parse_command("plot"),
            Err(CommandError::Unknown("plot".into()))
        );
    }

    #[test]
    fn test_read_commands_skips_bad_lines() {
        let input: &[u8] = b"region East\n\xff\xfe garbage\n\nplot\nshow\nquit\n";
        let commands: Vec<Command> = read_commands(input).collect::<Result<_, _>>().unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Filter(FilterEvent::SetRegions(Some(btreeset! {"East".to_string()}))),
                Command::Show,
                Command::Quit,
            ]
        );
    }
}
