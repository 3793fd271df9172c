use std::str::FromStr;

use fleet_transit::BusId;

/// One line typed at the dashboard prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `select <bus id>`, as a map marker click would.
    Select(BusId),
    /// `row <n>`, 1-based, as a list row click would.
    Row(usize),
    Retry,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` needs a number, got `{got}`")]
    BadArgument { command: &'static str, got: String },
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

pub const HELP: &str = "commands: select <bus id> | row <n> | retry | help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Help);
        };

        match verb.to_ascii_lowercase().as_str() {
            "select" | "s" => number(words.next(), "select").map(|id| Self::Select(BusId::new(id))),
            "row" | "r" => match number(words.next(), "row")? {
                0 => Err(CommandError::BadArgument {
                    command: "row",
                    got: "0".to_owned(),
                }),
                n => Ok(Self::Row(n as usize - 1)),
            },
            "retry" | "refresh" => Ok(Self::Retry),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

fn number(word: Option<&str>, command: &'static str) -> Result<u32, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument(command))?;
    word.parse().map_err(|_| CommandError::BadArgument {
        command,
        got: word.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("select 2".parse(), Ok(Command::Select(BusId::new(2))));
        assert_eq!("  S   7 ".parse(), Ok(Command::Select(BusId::new(7))));
        assert_eq!("row 1".parse(), Ok(Command::Row(0)));
        assert_eq!("retry".parse(), Ok(Command::Retry));
        assert_eq!("q".parse(), Ok(Command::Quit));
        assert_eq!("".parse(), Ok(Command::Help));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "select".parse::<Command>(),
            Err(CommandError::MissingArgument("select"))
        );
        assert_eq!(
            "select two".parse::<Command>(),
            Err(CommandError::BadArgument {
                command: "select",
                got: "two".to_owned(),
            })
        );
        assert!(matches!(
            "row 0".parse::<Command>(),
            Err(CommandError::BadArgument { command: "row", .. })
        ));
        assert_eq!(
            "fly".parse::<Command>(),
            Err(CommandError::Unknown("fly".to_owned()))
        );
    }
}
