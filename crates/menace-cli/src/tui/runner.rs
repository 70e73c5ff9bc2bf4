use crossterm::event;

use crate::tui::App;

/// TUI application runtime.
///
/// Executes applications that implement the [`App`] trait with a blocking
/// event loop: draw, wait for an event, hand it to the app, redraw.
#[derive(Debug)]
pub struct Tui;

impl Tui {
    /// Runs the application until [`App::should_exit`] returns true.
    pub fn run<A>(app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            terminal.draw(|f| app.draw(f))?;
            while !app.should_exit() {
                let event = event::read()?;
                app.handle_event(event);
                terminal.draw(|f| app.draw(f))?;
            }
            Ok(())
        })
    }
}
