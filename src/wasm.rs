use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api::GameService;
use crate::config::{DEFAULT_SIZE, GameConfig};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// One game owned by the JS side. Every call takes `&mut self`, so the JS
/// object is the only handle to its game.
#[wasm_bindgen]
pub struct WebGame {
    service: GameService,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(size: Option<u32>) -> Result<WebGame, JsError> {
        let size = size.map_or(DEFAULT_SIZE, |size| size as usize);
        let config = GameConfig::web().with_size(size);
        let service = GameService::with_default_selector(config).map_err(to_js_error)?;
        Ok(Self { service })
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.service.view())
    }

    #[wasm_bindgen(js_name = playMove)]
    pub fn play_move(&mut self, x: Option<i32>, y: Option<i32>) -> Result<JsValue, JsError> {
        let response = self
            .service
            .handle_move(x.map(i64::from), y.map(i64::from));
        to_js(&response)
    }

    #[wasm_bindgen(js_name = opponentMove)]
    pub fn opponent_move(&self) -> Result<JsValue, JsError> {
        to_js(&self.service.opponent_move())
    }

    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        let view = self.service.reset();
        to_js(&view)
    }

    /// JSON save file for the current game.
    pub fn save(&self) -> Result<String, JsError> {
        self.service.save().map_err(to_js_error)
    }

    pub fn load(&mut self, json: &str) -> Result<JsValue, JsError> {
        let view = self.service.load(json.as_bytes()).map_err(to_js_error)?;
        to_js(&view)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn to_js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}
