//! Answer Sheet WASM Module
//!
//! Grid layout and validation engine for the certification-exam answer
//! sheet: 22 fixed lines of 19 cells, Hangul/full-width characters take one
//! cell and half-width characters take half a cell.
//!
//! The pure logic lives in plain Rust modules; `api` exposes it to
//! JavaScript through `wasm-bindgen`.

pub mod error;
pub mod models;
pub mod utils;
pub mod diagnostics;
pub mod storage;
pub mod analysis;
pub mod parse;
pub mod normalize;
pub mod api;

// Re-export commonly used types
pub use error::AnswerSheetError;
pub use models::*;
pub use diagnostics::{validate, ValidationResult};
pub use utils::{text_width, width_of, wrap, wrap_lines, CharWidth, WrappedLine};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // A logger was already installed by the host page.
        return;
    }

    log::info!("Answer sheet WASM module initialized");
}
