use std::io::{BufRead, Write};

use sweeper_core::{Game, GameService, GameStore};
use sweeper_protocol::{ApiError, GameView};

use crate::command::{Command, HELP};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Board,
    Json,
}

/// Line-oriented front end over a [`GameService`]. Bad input and rejected moves are reported and
/// the session keeps going; only I/O failures end it.
pub struct Session<S> {
    service: GameService<S>,
    output: Output,
}

impl<S: GameStore> Session<S> {
    pub fn new(service: GameService<S>, output: Output) -> Self {
        Self { service, output }
    }

    pub fn run(&self, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
        writeln!(out, "{HELP}")?;
        for line in input.lines() {
            let line = line?;
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "error: {err}")?;
                    continue;
                }
            };
            log::trace!("command: {command:?}");

            if command == Command::Quit {
                break;
            }
            match self.execute(command) {
                Ok(reply) => writeln!(out, "{reply}")?,
                Err(err) => self.write_error(&mut out, &err)?,
            }
        }
        Ok(())
    }

    fn execute(&self, command: Command) -> Result<String, ApiError> {
        let game = match command {
            Command::New(request) => {
                let config = request.validate()?;
                self.service.start_game(config)?
            }
            Command::Reveal(id, request) => self.service.reveal_cell(id, request.row, request.col)?,
            Command::Flag(id, request) => self.service.flag_cell(id, request.row, request.col)?,
            Command::Show(id) => self.service.get_game(id)?,
            Command::List => return self.render_list(&self.service.list_games()?),
            Command::Help | Command::Quit => return Ok(HELP.to_string()),
        };
        self.render(&game)
    }

    fn render(&self, game: &Game) -> Result<String, ApiError> {
        match self.output {
            Output::Board => Ok(game.to_string()),
            Output::Json => to_json(&GameView::from_game(game)),
        }
    }

    fn render_list(&self, games: &[Game]) -> Result<String, ApiError> {
        match self.output {
            Output::Board => Ok(games
                .iter()
                .map(|game| {
                    format!(
                        "game {} [{}] {}x{} mines: {} revealed: {}",
                        game.id(),
                        game.status(),
                        game.rows(),
                        game.cols(),
                        game.mines(),
                        game.cells_revealed()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
            Output::Json => to_json(&games.iter().map(GameView::summary).collect::<Vec<_>>()),
        }
    }

    fn write_error(&self, out: &mut impl Write, err: &ApiError) -> std::io::Result<()> {
        match self.output {
            Output::Board => writeln!(out, "error: {}", err.message),
            Output::Json => match serde_json::to_string(err) {
                Ok(json) => writeln!(out, "{json}"),
                Err(_) => writeln!(out, "error: {}", err.message),
            },
        }
    }
}

fn to_json(value: &impl serde::Serialize) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| ApiError::new(err.to_string(), ApiError::INTERNAL))
}
