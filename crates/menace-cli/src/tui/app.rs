use crossterm::event::Event;
use ratatui::Frame;

/// Trait for TUI applications.
///
/// Applications executed by [`Tui::run`] implement this trait. The runtime
/// is turn-based: it blocks on terminal events and redraws after each one,
/// so there is no tick loop.
///
/// [`Tui::run`]: crate::tui::Tui::run
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key input, resize, etc.).
    fn handle_event(&mut self, event: Event);

    /// Draws the screen (called once at startup and after every event).
    fn draw(&self, frame: &mut Frame);
}
