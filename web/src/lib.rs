use clap::Parser;
use jackpot_core::{CancelToken, CellIndex, GameConfig, JackpotEngine, Mode};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub use storage::BrowserStore;

mod storage;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Use the debug guess limit
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Reads arguments from the location hash, e.g. `#--debug&--seed=42&-vv`.
    fn from_location() -> Self {
        let location: web_sys::Location = gloo::utils::window().location();
        let location_hash = location.hash().unwrap_or_default();
        Self::try_parse_from(location_hash.split(['#', '&'])).unwrap_or_else(|err| {
            log::warn!("Ignoring unparsable location hash: {}", err);
            Self::default()
        })
    }

    fn mode(&self) -> Mode {
        if self.debug { Mode::Debug } else { Mode::Normal }
    }
}

/// Handle the page holds on to. Owns the engine and the ambient sweep running against it.
#[wasm_bindgen]
pub struct JackpotApp {
    engine: Rc<RefCell<JackpotEngine<BrowserStore>>>,
    sweep: Option<CancelToken>,
}

#[wasm_bindgen]
impl JackpotApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JackpotApp {
        let args = Args::from_location();
        log::debug!("seed: {:?}, mode: {:?}", args.seed, args.mode());

        let config = GameConfig::DEFAULT.with_mode(args.mode());
        let seed = args.seed.unwrap_or_else(utils::js_random_seed);
        Self {
            engine: Rc::new(RefCell::new(JackpotEngine::new(config, BrowserStore, seed))),
            sweep: None,
        }
    }

    /// Restores or generates the grid, then lets the ambient reveal run in the background.
    pub fn initialize(&mut self) {
        let sweep = self.engine.borrow_mut().initialize();
        let Some(sweep) = sweep else {
            return;
        };

        self.sweep = Some(sweep.cancel_token());
        let engine = Rc::clone(&self.engine);
        wasm_bindgen_futures::spawn_local(async move {
            let report = sweep.run(&engine, &utils::TimerSleep).await;
            log::info!(
                "Ambient reveal done: {} opened, {} already open",
                report.revealed,
                report.skipped
            );
        });
    }

    /// Stops the ambient reveal at its next pause.
    pub fn stop(&mut self) {
        if let Some(token) = self.sweep.take() {
            token.cancel();
        }
    }

    pub fn open_user_cell(&self, index: CellIndex) -> bool {
        self.engine.borrow_mut().open_user_cell(index)
    }

    /// Like `open_user_cell`, but returns the revealed prize name (`jackpot`, `small-jackpot` or `empty`).
    /// `None` means the reveal was refused and no guess was spent.
    pub fn open_user_cell_with_prize(&self, index: CellIndex) -> Option<String> {
        let outcome = self.engine.borrow_mut().reveal_for_user(index);
        log::debug!("cell {}: {:?}", index, outcome);
        outcome.revealed_prize().map(|prize| prize.as_str().to_string())
    }

    pub fn can_user_open_cell(&self) -> bool {
        self.engine.borrow().can_user_open_cell()
    }

    pub fn remaining_guesses(&self) -> u32 {
        self.engine.borrow().remaining_guesses()
    }

    pub fn rows(&self) -> u8 {
        self.engine.borrow().config().size.0
    }

    pub fn cols(&self) -> u8 {
        self.engine.borrow().config().size.1
    }

    /// Visible state name of a cell (`closed`, `jackpot`, `small-jackpot` or `empty`).
    pub fn visible_state(&self, index: CellIndex) -> Option<String> {
        let engine = self.engine.borrow();
        engine
            .cell(index)
            .map(|cell| cell.visible().as_str().to_string())
    }

    /// Display label for a cell, e.g. `€ 2.5k`. Closed cells show the empty amount.
    pub fn amount_label(&self, index: CellIndex) -> Option<String> {
        let engine = self.engine.borrow();
        let cell = engine.cell(index)?;
        Some(utils::price_label(&engine.formatted_amount(cell.visible())))
    }

    /// Discards the current and saved game. Call `initialize` again (or reload) to start over.
    pub fn reset_storage(&mut self) {
        self.stop();
        self.engine.borrow_mut().discard();
    }
}

impl Default for JackpotApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for JackpotApp {
    fn drop(&mut self) {
        self.stop();
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let args = Args::from_location();
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    log::debug!("App started");
}
