pub mod action;
mod app;
pub mod bus;
pub mod controller;
pub mod effect;
pub mod input;
pub mod keybindings;
pub mod mode;
pub mod palette;
pub mod registry;
pub mod state;
pub mod store;
mod theme;
mod ui;
mod views;

use crate::config::Config;
use eyre::Result;
use state::Route;
use std::time::Duration;
use store::Store;

pub fn run(config: &Config, start_route: Route, prefix_timeout: Duration) -> Result<()> {
    let store = Store::seeded(&config.links, &config.blogs);
    let mut app = app::App::new(store, prefix_timeout, start_route);
    app.run()
}
