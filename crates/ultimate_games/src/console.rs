//! Console game: a human X against the search engine playing O.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};
use ultimate_tictactoe::{Board, BoardIndex, Coord, Outcome, Player, best_move};

/// The sub-board the console game is played on.
const PLAY_BOARD: Coord = Coord::new(0, 0);

/// Interactive session over a reader and a writer.
///
/// The level is the AI's search depth. It goes up by one after every
/// game X wins.
pub struct ConsoleGame<R, W> {
    input: R,
    output: W,
    level: u32,
}

impl<R: BufRead, W: Write> ConsoleGame<R, W> {
    /// Creates a session starting at `level`.
    pub fn new(input: R, output: W, level: u32) -> Self {
        Self {
            input,
            output,
            level,
        }
    }

    /// Current level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Plays games until the player declines a rematch or input ends.
    ///
    /// Returns the outcome of every finished game.
    #[instrument(skip(self), fields(level = self.level))]
    pub fn run(&mut self) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        loop {
            let mut index = BoardIndex::new()?;
            let board = index.board_for_mut(PLAY_BOARD)?;

            self.write_title()?;
            let Some(outcome) = self.play_round(board)? else {
                debug!("Input closed mid-game");
                return Ok(outcomes);
            };
            info!(%outcome, level = self.level, "Game finished");
            outcomes.push(outcome);

            writeln!(self.output, "{}\n", board)?;
            writeln!(self.output, "\t*** {} ***\n", outcome)?;

            write!(self.output, "Play Again? (Y/N): ")?;
            self.output.flush()?;
            let Some(answer) = self.read_line()? else {
                return Ok(outcomes);
            };
            if answer.trim().eq_ignore_ascii_case("n") {
                writeln!(self.output, "\nGoodbye.")?;
                return Ok(outcomes);
            }
            if outcome.winner() == Some(Player::X) {
                self.level += 1;
            }
        }
    }

    /// Plays one game; `None` if input ran out first.
    fn play_round(&mut self, board: &mut Board) -> Result<Option<Outcome>> {
        while !board.is_terminal() {
            let Some(choice) = self.prompt_move(board)? else {
                return Ok(None);
            };
            board
                .apply_move(choice, Player::X)
                .context("Failed to apply player move")?;

            if !board.is_terminal() {
                match best_move(board, Player::O, self.level) {
                    Some(reply) => {
                        debug!(%reply, level = self.level, "AI reply");
                        board
                            .apply_move(reply, Player::O)
                            .context("Failed to apply AI move")?;
                    }
                    None => warn!("AI found no move on a non-terminal board"),
                }
            }
        }
        Ok(board.outcome())
    }

    /// Lists the open cells and reads a choice until one is valid.
    fn prompt_move(&mut self, board: &Board) -> Result<Option<Coord>> {
        let open = board.remaining_moves().to_vec();
        writeln!(self.output, "\nCurrent Board State:\n{}", board)?;
        writeln!(self.output, "Select a Position:")?;
        for (number, coord) in open.iter().enumerate() {
            writeln!(self.output, "\t{}: {}", number + 1, coord)?;
        }

        loop {
            write!(self.output, "Enter number between 1 - {}: ", open.len())?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(number) if (1..=open.len()).contains(&number) => {
                    return Ok(Some(open[number - 1]));
                }
                _ => debug!(input = %line.trim(), "Rejected move choice"),
            }
        }
    }

    fn write_title(&mut self) -> Result<()> {
        writeln!(self.output, "-------")?;
        writeln!(self.output, "|T|I|C|")?;
        writeln!(self.output, "|T|A|C|")?;
        writeln!(self.output, "|T|O|E|")?;
        writeln!(self.output, "-------\n")?;
        writeln!(self.output, "Level: {}", self.level)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        Ok((read > 0).then_some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(script: &str, level: u32) -> (Vec<Outcome>, u32, String) {
        let mut output = Vec::new();
        let (outcomes, level) = {
            let mut game = ConsoleGame::new(Cursor::new(script.to_string()), &mut output, level);
            let outcomes = game.run().unwrap();
            (outcomes, game.level())
        };
        (outcomes, level, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_win_raises_level_and_quit_says_goodbye() {
        // X (0,0); O (0,1); X (1,1); O (0,2); X (2,2) wins the diagonal.
        let (outcomes, level, output) = session("abc\n0\n1\n3\n5\ny\n", 1);

        assert_eq!(outcomes, vec![Outcome::Winner(Player::X)]);
        assert_eq!(level, 2);
        assert!(output.contains("Level: 1"));
        assert!(output.contains("Level: 2"));
        assert!(output.contains("*** X Wins ***"));
        assert!(!output.contains("Goodbye."));
    }

    #[test]
    fn test_decline_rematch() {
        let (outcomes, level, output) = session("1\n3\n5\nN\n", 1);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(level, 1);
        assert!(output.ends_with("\nGoodbye.\n"));
    }

    #[test]
    fn test_lists_open_cells_in_order() {
        let (_, _, output) = session("", 1);
        assert!(output.contains("\t1: [0, 0]\n"));
        assert!(output.contains("\t9: [2, 2]\n"));
        assert!(output.contains("Enter number between 1 - 9: "));
    }

    #[test]
    fn test_eof_mid_game_ends_quietly() {
        let (outcomes, _, _) = session("5\n", 3);
        assert!(outcomes.is_empty());
    }
}
