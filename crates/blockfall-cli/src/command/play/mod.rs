use blockfall_engine::{PieceGenerator, PieceSeed};

use crate::{
    schema::settings::Settings,
    store::DataStore,
    tui::{Runtime, ScreenStack, ScreenTransition},
};

use self::screens::MainMenuScreen;

mod screens;

/// State shared by every screen of the game.
#[derive(Debug)]
pub(crate) struct PlayContext {
    pub store: DataStore,
    pub settings: Settings,
    /// Fixed piece seed for every game started in this run
    pub seed: Option<PieceSeed>,
}

impl PlayContext {
    pub fn generator(&self) -> PieceGenerator {
        self.seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed)
    }
}

pub(crate) type PlayRuntime = Runtime<PlayContext>;
pub(crate) type PlayTransition = ScreenTransition<PlayContext>;

pub(crate) fn run(store: DataStore, seed: Option<PieceSeed>) -> anyhow::Result<()> {
    let settings = match store.load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("ignoring unreadable settings: {err:#}");
            Settings::default()
        }
    };
    log::info!("starting game with data directory {}", store.root().display());

    let mut runtime = Runtime::new(PlayContext {
        store,
        settings,
        seed,
    });
    let mut stack = ScreenStack::new(Box::new(MainMenuScreen::new()));
    runtime.run(&mut stack)?;

    log::info!("exiting");
    Ok(())
}
