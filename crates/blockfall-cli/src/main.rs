mod command;
mod logging;
mod model;
mod schema;
mod store;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
