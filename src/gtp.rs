//! Go Text Protocol dispatch loop.
//!
//! Grounded in the teacher's `GtpEngine` (struct owning engine state, a
//! `run()` reading stdin lines, `execute` matching on command name and
//! returning a `(bool, String)` success/response tuple) and in the
//! reference engine's `GTPHelper` for the exact command table and response
//! text (`= 2`, `= GuaGua`, `= 1.0`, `? unacceptable size`). `undo` and
//! `final_score` are new relative to the teacher; `play`/`genmove` take an
//! explicit color argument that must match the tracked side to move.

use std::io::{self, BufRead, Write};

use crate::agent::Agent;
use crate::board::{Board, Color};
use crate::error::GtpError;
use crate::mcts::SearchBudget;

/// Commands this engine answers, in the order `list_commands` reports them.
const KNOWN_COMMANDS: &[&str] = &[
    "protocol_version",
    "name",
    "version",
    "known_command",
    "list_commands",
    "boardsize",
    "clear_board",
    "komi",
    "play",
    "genmove",
    "undo",
    "final_score",
    "showboard",
    "quit",
];

const ENGINE_NAME: &str = "GuaGua";
const ENGINE_VERSION: &str = "1.0";

fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// GTP engine state: the board, whose turn it is, and an undo stack of
/// `(board, side_to_move)` snapshots taken before every applied move.
pub struct GtpEngine {
    board: Board,
    side_to_move: Color,
    history: Vec<(Board, Color)>,
    budget: SearchBudget,
    rng: fastrand::Rng,
}

impl GtpEngine {
    pub fn new(budget: SearchBudget, seed: u64) -> Self {
        GtpEngine {
            board: Board::new(),
            side_to_move: Color::Black,
            history: Vec::new(),
            budget,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Read commands from stdin, write responses to stdout, until `quit` or
    /// end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }
            let command = parts[0].to_ascii_lowercase();
            let args = &parts[1..];

            log::debug!("gtp command: {command} {args:?}");
            let (ok, message) = self.execute(&command, args);

            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            let prefix = if ok { '=' } else { '?' };
            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return (None, trimmed);
        }
        match trimmed[..digits].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[digits..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command, returning `(success, response-body)`.
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "protocol_version" => (true, "2".to_string()),
            "name" => (true, ENGINE_NAME.to_string()),
            "version" => (true, ENGINE_VERSION.to_string()),

            "known_command" => {
                let known = args
                    .first()
                    .is_some_and(|c| KNOWN_COMMANDS.contains(&c.to_ascii_lowercase().as_str()));
                (true, known.to_string())
            }

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "boardsize" => match args.first().and_then(|s| s.parse::<usize>().ok()) {
                Some(size) if size == crate::constants::N => (true, String::new()),
                _ => (false, GtpError::UnacceptableSize.to_string()),
            },

            "clear_board" => {
                self.board.clear();
                self.side_to_move = Color::Black;
                self.history.clear();
                (true, String::new())
            }

            // NoGo has no komi; the argument is accepted and ignored
            // unconditionally, per spec's GTP table.
            "komi" => (true, String::new()),

            "play" => self.cmd_play(args),
            "genmove" => self.cmd_genmove(args),
            "undo" => self.cmd_undo(),
            "final_score" => {
                // Only the side to move can be the stuck side right now;
                // report whichever color that check actually names.
                let winner = if self.board.has_legal_move(self.side_to_move) {
                    self.side_to_move
                } else {
                    self.side_to_move.opponent()
                };
                (true, format!("{winner}+1"))
            }

            "showboard" => (true, format!("\n{}", self.board)),

            "quit" => (true, String::new()),

            _ => (false, GtpError::UnknownCommand.to_string()),
        }
    }

    fn cmd_play(&mut self, args: &[&str]) -> (bool, String) {
        if args.len() < 2 {
            return (false, GtpError::IllegalMove.to_string());
        }
        let Some(color) = parse_color(args[0]) else {
            return (false, GtpError::IllegalMove.to_string());
        };
        if color != self.side_to_move {
            return (false, GtpError::IllegalMove.to_string());
        }
        let Some(point) = Board::parse_coord(args[1]) else {
            return (false, GtpError::IllegalMove.to_string());
        };

        self.history.push((self.board.clone(), self.side_to_move));
        if self.board.place(color, point) {
            self.side_to_move = color.opponent();
            (true, String::new())
        } else {
            self.history.pop();
            (false, GtpError::IllegalMove.to_string())
        }
    }

    fn cmd_genmove(&mut self, args: &[&str]) -> (bool, String) {
        let Some(color) = args.first().and_then(|c| parse_color(c)) else {
            return (false, GtpError::IllegalMove.to_string());
        };
        if color != self.side_to_move {
            return (false, GtpError::IllegalMove.to_string());
        }

        let agent = Agent::Mcts(self.budget);
        let point = agent.take_action(&self.board, color, &mut self.rng);
        if point == crate::constants::RESIGN_POINT {
            return (true, "resign".to_string());
        }

        self.history.push((self.board.clone(), self.side_to_move));
        self.board.place(color, point);
        self.side_to_move = color.opponent();
        (true, Board::str_coord(point))
    }

    fn cmd_undo(&mut self) -> (bool, String) {
        match self.history.pop() {
            Some((board, side)) => {
                self.board = board;
                self.side_to_move = side;
                (true, String::new())
            }
            None => (false, GtpError::CannotUndo.to_string()),
        }
    }
}

impl Default for GtpEngine {
    fn default() -> Self {
        GtpEngine::new(SearchBudget::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_engine() -> GtpEngine {
        GtpEngine::new(
            SearchBudget {
                time_budget: Duration::ZERO,
                min_playouts: 20,
            },
            1,
        )
    }

    #[test]
    fn name_and_version() {
        let mut e = test_engine();
        assert_eq!(e.execute("name", &[]), (true, "GuaGua".to_string()));
        assert_eq!(e.execute("version", &[]), (true, "1.0".to_string()));
        assert_eq!(e.execute("protocol_version", &[]), (true, "2".to_string()));
    }

    #[test]
    fn list_commands_contains_required_set() {
        let mut e = test_engine();
        let (ok, body) = e.execute("list_commands", &[]);
        assert!(ok);
        for cmd in [
            "genmove",
            "play",
            "undo",
            "showboard",
            "quit",
            "final_score",
        ] {
            assert!(body.lines().any(|l| l == cmd), "missing {cmd} in {body}");
        }
    }

    #[test]
    fn known_command_true_and_false() {
        let mut e = test_engine();
        assert_eq!(e.execute("known_command", &["play"]), (true, "true".to_string()));
        assert_eq!(
            e.execute("known_command", &["nonsense"]),
            (true, "false".to_string())
        );
    }

    #[test]
    fn boardsize_accepts_only_nine() {
        let mut e = test_engine();
        assert_eq!(e.execute("boardsize", &["9"]), (true, String::new()));
        let (ok, _) = e.execute("boardsize", &["19"]);
        assert!(!ok);
    }

    #[test]
    fn play_rejects_out_of_turn_color() {
        let mut e = test_engine();
        let (ok, _) = e.execute("play", &["white", "E5"]);
        assert!(!ok);
    }

    #[test]
    fn play_then_undo_restores_board() {
        let mut e = test_engine();
        let (ok, _) = e.execute("play", &["black", "E5"]);
        assert!(ok);
        assert_eq!(e.side_to_move, Color::White);

        let (ok, _) = e.execute("undo", &[]);
        assert!(ok);
        assert_eq!(e.side_to_move, Color::Black);
        assert!(!e.board.forbidden(Color::Black).test(Board::parse_coord("E5").unwrap()));
    }

    #[test]
    fn double_undo_after_two_plays_restores_empty_board() {
        // spec.md concrete scenario: clear_board; play B E5; play W D5;
        // undo; undo; showboard -> empty board, Black to move.
        let mut e = test_engine();
        assert_eq!(e.execute("clear_board", &[]), (true, String::new()));
        assert_eq!(e.execute("play", &["b", "E5"]).0, true);
        assert_eq!(e.execute("play", &["w", "D5"]).0, true);

        assert_eq!(e.execute("undo", &[]).0, true);
        assert_eq!(e.execute("undo", &[]).0, true);

        assert_eq!(e.side_to_move, Color::Black);
        assert!(e.history.is_empty());
        for p in 0..crate::constants::NUM_POINTS {
            assert_eq!(e.board.at(p), crate::board::Stone::Empty, "point {p} should be empty");
        }
        let (ok, body) = e.execute("showboard", &[]);
        assert!(ok);
        assert!(!body.contains('X') && !body.contains('O'));
    }

    #[test]
    fn undo_with_empty_history_fails() {
        let mut e = test_engine();
        let (ok, msg) = e.execute("undo", &[]);
        assert!(!ok);
        assert_eq!(msg, "cannot undo");
    }

    #[test]
    fn genmove_plays_a_legal_move_and_advances_turn() {
        let mut e = test_engine();
        let (ok, coord) = e.execute("genmove", &["black"]);
        assert!(ok);
        assert_ne!(coord, "resign");
        assert_eq!(e.side_to_move, Color::White);
    }

    #[test]
    fn final_score_reports_side_to_move_when_it_can_still_play() {
        // Empty board: Black to move and not stuck, so Black is reported.
        let mut e = test_engine();
        let (ok, msg) = e.execute("final_score", &[]);
        assert!(ok);
        assert_eq!(msg, "B+1");
    }

    #[test]
    fn final_score_reports_opponent_when_side_to_move_is_stuck() {
        let mut e = test_engine();
        e.board.force_forbid_all(Color::Black);
        let (ok, msg) = e.execute("final_score", &[]);
        assert!(ok);
        assert_eq!(msg, "W+1");
    }

    #[test]
    fn clear_board_resets_state() {
        let mut e = test_engine();
        e.execute("play", &["black", "E5"]);
        e.execute("clear_board", &[]);
        assert_eq!(e.side_to_move, Color::Black);
        let (ok, _) = e.execute("undo", &[]);
        assert!(!ok);
    }
}
