//! Tab-delimited command lines, as typed into the interactive loop.
//!
//! A line is a verb followed by tab-separated arguments:
//!
//! ```text
//! todo | today | all
//! show<TAB>ID
//! add<TAB>DESCRIPTION<TAB>YYYY-MM-DD
//! tick<TAB>ID
//! untick<TAB>ID
//! ```

use crate::error::{GtdError, Result};
use crate::ops::{self, mutators, selectors};
use crate::output::unreadable_warning;
use crate::store::FileStore;
use crate::task_id::parse_task_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Todo,
    Today,
    All,
    Show(i64),
    Add { description: String, due: String },
    Tick(i64),
    Untick(i64),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split('\t').collect();
        let verb = fields[0].trim();

        match verb {
            "todo" => Ok(Self::Todo),
            "today" => Ok(Self::Today),
            "all" => Ok(Self::All),
            "show" => Ok(Self::Show(id_argument(verb, &fields)?)),
            "tick" => Ok(Self::Tick(id_argument(verb, &fields)?)),
            "untick" => Ok(Self::Untick(id_argument(verb, &fields)?)),
            "add" => match fields.as_slice() {
                [_, description, due] => Ok(Self::Add {
                    description: (*description).to_string(),
                    due: (*due).to_string(),
                }),
                _ => Err(GtdError::InvalidInput(
                    "usage: add<TAB>description<TAB>YYYY-MM-DD".into(),
                )),
            },
            "" => Err(GtdError::InvalidInput("empty command".into())),
            other => Err(GtdError::UnknownCommand(other.to_string())),
        }
    }
}

fn id_argument(verb: &str, fields: &[&str]) -> Result<i64> {
    match fields {
        [_, id] => parse_task_id(id),
        _ => Err(GtdError::InvalidInput(format!("usage: {verb}<TAB>id"))),
    }
}

/// Run a parsed command and return the text to show the user.
///
/// Writes that carried unreadable lines through append a warning line after
/// `Done.`.
pub fn execute(store: &FileStore, command: Command) -> Result<String> {
    let kept_unreadable = match command {
        Command::Todo => return render(ops::query_many(store, selectors::pending)?),
        Command::Today => return render(ops::query_many(store, selectors::due_today)?),
        Command::All => return render(ops::query_many(store, selectors::all)?),
        Command::Show(id) => return render(ops::query_one(store, id)?),
        Command::Add { description, due } => ops::add(store, &description, &due)?.kept_unreadable,
        Command::Tick(id) => ops::update(store, id, mutators::tick)?.kept_unreadable,
        Command::Untick(id) => ops::update(store, id, mutators::untick)?.kept_unreadable,
    };
    if kept_unreadable > 0 {
        Ok(format!("Done.\n{}", unreadable_warning(kept_unreadable)))
    } else {
        Ok("Done.".to_string())
    }
}

fn render(value: impl std::fmt::Display) -> Result<String> {
    Ok(value.to_string().trim_end().to_string())
}

pub fn interpret(store: &FileStore, line: &str) -> Result<String> {
    execute(store, Command::parse(line)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn store() -> (TempDir, FileStore) {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("tasks.txt"));
        (dir, store)
    }

    #[test]
    fn parses_every_verb() {
        assert_eq!(Command::parse("todo\n").unwrap(), Command::Todo);
        assert_eq!(Command::parse("today").unwrap(), Command::Today);
        assert_eq!(Command::parse("all\r\n").unwrap(), Command::All);
        assert_eq!(Command::parse("show\t3").unwrap(), Command::Show(3));
        assert_eq!(Command::parse("tick\t0\n").unwrap(), Command::Tick(0));
        assert_eq!(Command::parse("untick\t12").unwrap(), Command::Untick(12));
        assert_eq!(
            Command::parse("add\tBuy milk\t2024-01-01\n").unwrap(),
            Command::Add {
                description: "Buy milk".into(),
                due: "2024-01-01".into()
            }
        );
    }

    #[test]
    fn wrong_field_counts_are_invalid_input() {
        for line in [
            "add\tBuy milk",
            "add\tBuy milk\t2024-01-01\textra",
            "show",
            "tick\t1\t2",
            "untick",
        ] {
            assert!(
                matches!(Command::parse(line), Err(GtdError::InvalidInput(_))),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn non_numeric_ids_are_reported() {
        assert!(matches!(Command::parse("show\tfirst"), Err(GtdError::InvalidId(_))));
        assert_eq!(Command::parse("tick\t-1").unwrap(), Command::Tick(-1));
    }

    #[test]
    fn unknown_verbs_are_reported() {
        assert!(matches!(
            Command::parse("delete\t1"),
            Err(GtdError::UnknownCommand(verb)) if verb == "delete"
        ));
        assert!(matches!(Command::parse("\n"), Err(GtdError::InvalidInput(_))));
    }

    #[test]
    fn buy_milk_workflow() {
        let (_dir, store) = store();
        assert_eq!(interpret(&store, "add\tBuy milk\t2024-01-01\n").unwrap(), "Done.");
        assert_eq!(
            interpret(&store, "todo\n").unwrap(),
            "0: 'Buy milk' due 1 January 2024"
        );

        assert_eq!(interpret(&store, "tick\t0\n").unwrap(), "Done.");
        assert_eq!(interpret(&store, "todo\n").unwrap(), "");
        assert_eq!(
            interpret(&store, "all\n").unwrap(),
            "0: 'Buy milk' due 1 January 2024 (DONE)"
        );
        assert_eq!(
            interpret(&store, "show\t0").unwrap(),
            "'Buy milk' due 1 January 2024 (DONE)"
        );

        interpret(&store, "untick\t0").unwrap();
        assert!(!interpret(&store, "todo").unwrap().is_empty());
    }

    #[test]
    fn lookup_errors_keep_their_kind() {
        let (_dir, store) = store();
        interpret(&store, "add\ta\t2024-01-01").unwrap();
        assert!(matches!(interpret(&store, "show\t-1"), Err(GtdError::NegativeId(-1))));
        assert!(matches!(interpret(&store, "tick\t1"), Err(GtdError::TaskNotFound(1))));
        assert!(matches!(
            interpret(&store, "add\tb\t01-01-2024"),
            Err(GtdError::InvalidDate(_))
        ));
    }

    #[test]
    fn writes_warn_about_unreadable_lines() {
        let (_dir, store) = store();
        std::fs::write(store.path(), "ok\t0\t2024-01-01\ngarbage\n").unwrap();

        assert_eq!(
            interpret(&store, "tick\t0").unwrap(),
            "Done.\nwarning: 1 unreadable line in the task file left as-is"
        );
        assert_eq!(interpret(&store, "all").unwrap(), "0: 'ok' due 1 January 2024 (DONE)");
        assert!(std::fs::read_to_string(store.path()).unwrap().ends_with("garbage\n"));
    }
}
