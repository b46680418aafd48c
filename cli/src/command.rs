use std::str::FromStr;

use sweeper_core::GameId;
use sweeper_protocol::{MoveRequest, StartGameRequest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    New(StartGameRequest),
    Reveal(GameId, MoveRequest),
    Flag(GameId, MoveRequest),
    Show(GameId),
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  new <rows> <cols> <mines>   start a game
  reveal <id> <row> <col>     open a cell (alias: r)
  flag <id> <row> <col>       toggle a flag (alias: f)
  show <id>                   print a game
  list                        summarize every game
  help                        this text
  quit                        leave";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` expects {expected} arguments")]
    Arity {
        command: &'static str,
        expected: usize,
    },
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` is not a valid game id, ids start at 1")]
    InvalidId(String),
}

fn number<T: FromStr>(arg: &str) -> Result<T, ParseError> {
    arg.parse().map_err(|_| ParseError::NotANumber(arg.to_string()))
}

fn game_id(arg: &str) -> Result<GameId, ParseError> {
    match arg.parse::<GameId>() {
        Ok(id) => Ok(id),
        Err(_) if arg.parse::<i64>().is_ok() => Err(ParseError::InvalidId(arg.to_string())),
        Err(_) => Err(ParseError::NotANumber(arg.to_string())),
    }
}

fn args<'a, const N: usize>(
    command: &'static str,
    rest: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    rest.try_into().map_err(|_| ParseError::Arity {
        command,
        expected: N,
    })
}

fn cell_move(command: &'static str, rest: &[&str]) -> Result<(GameId, MoveRequest), ParseError> {
    let [id, row, col] = args(command, rest)?;
    let request = MoveRequest {
        row: number(row)?,
        col: number(col)?,
    };
    Ok((game_id(id)?, request))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, rest)) = words.split_first() else {
            return Ok(Command::Help);
        };

        Ok(match head {
            "new" => {
                let [rows, cols, mines] = args("new", rest)?;
                Command::New(StartGameRequest {
                    rows: number(rows)?,
                    cols: number(cols)?,
                    mines: number(mines)?,
                })
            }
            "reveal" | "r" => {
                let (id, request) = cell_move("reveal", rest)?;
                Command::Reveal(id, request)
            }
            "flag" | "f" => {
                let (id, request) = cell_move("flag", rest)?;
                Command::Flag(id, request)
            }
            "show" => {
                let [id] = args("show", rest)?;
                Command::Show(game_id(id)?)
            }
            "list" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        })
    }
}
