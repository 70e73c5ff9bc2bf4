use crossterm::event::{Event, KeyCode, KeyEventKind};
use rand_pcg::Pcg64Mcg;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use menace_agent::{Agent, Outcome};
use menace_engine::{Board, Cell, GameStatus, Player, Square};
use menace_stats::{GameResult, OutcomeTally};

use crate::tui::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    HumanTurn,
    GameOver(GameStatus),
}

/// Interactive human-vs-MENACE game screen.
///
/// MENACE plays X and moves first; the human plays O by pressing the
/// square digit (0-8). Illegal input is reported and retried without
/// touching the board or the agent's game trace. Finished games reinforce
/// the agent, so MENACE keeps learning from its human opponent.
#[derive(Debug)]
pub struct PlayApp {
    agent: Agent,
    rng: Pcg64Mcg,
    board: Board,
    phase: Phase,
    message: Option<String>,
    bead_lines: Vec<String>,
    tally: OutcomeTally,
    should_exit: bool,
}

impl PlayApp {
    pub fn new(agent: Agent, rng: Pcg64Mcg) -> Self {
        let mut app = Self {
            agent,
            rng,
            board: Board::EMPTY,
            phase: Phase::HumanTurn,
            message: None,
            bead_lines: Vec::new(),
            tally: OutcomeTally::default(),
            should_exit: false,
        };
        app.start_game();
        app
    }

    fn start_game(&mut self) {
        self.board = Board::EMPTY;
        self.message = None;
        self.agent_move();
    }

    fn agent_move(&mut self) {
        let square = self
            .agent
            .choose_move(&self.board, &mut self.rng)
            .expect("agent only moves on ongoing boards");
        self.board = self
            .board
            .apply(square)
            .expect("agent moves are always legal");
        self.bead_lines = self.last_move_beads(square);

        match self.board.status() {
            GameStatus::Ongoing => self.phase = Phase::HumanTurn,
            status => self.finish(status),
        }
    }

    /// Bead counts of the matchbox behind the agent's last decision,
    /// mapped to original-board coordinates.
    fn last_move_beads(&self, chosen: Square) -> Vec<String> {
        let Some(entry) = self.agent.trace().last() else {
            return Vec::new();
        };
        let Some(matchbox) = self.agent.store().get(&entry.key) else {
            return Vec::new();
        };
        matchbox
            .iter()
            .map(|(square, count)| {
                let original = entry.transform.original_square(square);
                let marker = if original == chosen { " <- played" } else { "" };
                format!("square {original}: {count:>4} beads{marker}")
            })
            .collect()
    }

    fn human_move(&mut self, square: Square) {
        match self.board.apply(square) {
            Ok(board) => {
                self.board = board;
                self.message = None;
                match self.board.status() {
                    GameStatus::Ongoing => self.agent_move(),
                    status => self.finish(status),
                }
            }
            Err(err) => {
                self.message = Some(format!("Illegal move: {err}. Try again."));
            }
        }
    }

    fn finish(&mut self, status: GameStatus) {
        let outcome =
            Outcome::from_status(status, Player::X).expect("finish is called on terminal boards");
        self.agent.record_outcome(outcome);
        self.tally.record(match outcome {
            Outcome::Win => GameResult::Win,
            Outcome::Draw => GameResult::Draw,
            Outcome::Loss => GameResult::Loss,
        });
        self.phase = Phase::GameOver(status);
    }

    fn board_lines(&self) -> Vec<Line<'static>> {
        let x_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let o_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let mut lines = Vec::new();
        for row in 0..3 {
            if row > 0 {
                lines.push(Line::from("---+---+---"));
            }
            let mut spans = Vec::new();
            for col in 0..3u8 {
                if col > 0 {
                    spans.push(Span::raw("|"));
                }
                let index = row * 3 + col;
                let square = Square::new(index).expect("indices 0-8 are valid squares");
                let span = match self.board.get(square) {
                    Cell::X => Span::styled(" X ", x_style),
                    Cell::O => Span::styled(" O ", o_style),
                    Cell::Empty => Span::styled(format!(" {index} "), hint_style),
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    fn status_line(&self) -> Line<'static> {
        match self.phase {
            Phase::HumanTurn => Line::from("Your move: press a square digit (0-8)"),
            Phase::GameOver(GameStatus::Won(Player::X)) => Line::styled(
                "MENACE wins!",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Phase::GameOver(GameStatus::Won(Player::O)) => Line::styled(
                "You win!",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Phase::GameOver(_) => Line::from("Draw."),
        }
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.phase == Phase::HumanTurn {
                    // quitting mid-game learns nothing from it
                    self.agent.abandon_game();
                }
                self.should_exit = true;
            }
            KeyCode::Char('n') => {
                if self.phase == Phase::HumanTurn {
                    self.agent.abandon_game();
                }
                self.start_game();
            }
            KeyCode::Char(c @ '0'..='8') if self.phase == Phase::HumanTurn => {
                let index = u8::try_from(c).expect("digit fits in u8") - b'0';
                let square = Square::new(index).expect("digits 0-8 are valid squares");
                self.human_move(square);
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let outer = Block::bordered().title(" MENACE - Tic-Tac-Toe ");
        let inner = outer.inner(frame.area());
        frame.render_widget(outer, frame.area());

        let [board_area, info_area] =
            Layout::horizontal([Constraint::Length(14), Constraint::Min(30)]).areas(inner);

        frame.render_widget(Paragraph::new(self.board_lines()), board_area);

        let mut info = vec![
            Line::from("You are O. MENACE is X and moves first."),
            Line::from(""),
            self.status_line(),
        ];
        if let Some(message) = &self.message {
            info.push(Line::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ));
        }
        info.push(Line::from(""));
        info.push(Line::from(format!(
            "Session: MENACE {} / draws {} / you {}",
            self.tally.wins(),
            self.tally.draws(),
            self.tally.losses(),
        )));
        info.push(Line::from(""));
        if !self.bead_lines.is_empty() {
            info.push(Line::from("Beads behind MENACE's last move:"));
            for line in &self.bead_lines {
                info.push(Line::styled(
                    format!("  {line}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            info.push(Line::from(""));
        }
        info.push(Line::from("[0-8] play   [n] new game   [q] quit"));

        frame.render_widget(Paragraph::new(info), info_area);
    }
}
