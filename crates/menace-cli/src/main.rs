mod command;
mod model;
mod tui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
