//! JavaScript bindings for a single game session.

use once_cell::sync::OnceCell;
use wasm_bindgen::prelude::*;

use crate::error::CheckersError;
use crate::game::GameSession;
use crate::options::BoardOptions;

static LOGGER: OnceCell<()> = OnceCell::new();

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Routes engine logs to the browser console. Safe to call repeatedly.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    LOGGER.get_or_init(install_console_logger);
}

#[cfg(target_arch = "wasm32")]
fn install_console_logger() {
    // Fails only when the host already installed a logger; that one stays.
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log::warn!("console logger not installed: {err}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install_console_logger() {}

#[wasm_bindgen]
pub struct CheckersGame {
    session: GameSession,
}

#[wasm_bindgen]
impl CheckersGame {
    /// Starts a new game. `options` may be omitted for a standard 8x8 board.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<CheckersGame, JsError> {
        let options: BoardOptions = if options.is_undefined() || options.is_null() {
            BoardOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Ok(Self {
            session: GameSession::new(&options)?,
        })
    }

    pub fn restore(blob: &str) -> Result<CheckersGame, JsError> {
        Ok(Self {
            session: GameSession::restore(blob)?,
        })
    }

    pub fn select(&mut self, x: i32, y: i32) -> Result<JsValue, JsError> {
        let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
            return Err(CheckersError::OutOfBounds {
                x: x.into(),
                y: y.into(),
                width: self.session.width(),
                height: self.session.height(),
            }
            .into());
        };
        let selection = self.session.select_or_move(col, row)?;
        Ok(serde_wasm_bindgen::to_value(&selection)?)
    }

    /// Plays the computer's full move. Resolves to `undefined` when the side
    /// to move is stuck.
    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsError> {
        let turn = self.session.choose_ai_move()?;
        Ok(serde_wasm_bindgen::to_value(&turn)?)
    }

    pub fn serialize(&self) -> Result<String, JsError> {
        Ok(self.session.serialize()?)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.snapshot())?)
    }

    #[wasm_bindgen(getter, js_name = nextMoveByBlack)]
    pub fn next_move_by_black(&self) -> bool {
        self.session.next_move_by_black()
    }

    #[wasm_bindgen(getter, js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }
}
