//! WebAssembly bindings for domtree
//!
//! JavaScript-friendly wrappers around [`parse`](crate::parse) and the tree
//! dump. Only compiled when targeting wasm32.

#![cfg(target_arch = "wasm32")]

use crate::{parse, tree_dump};
use wasm_bindgen::prelude::*;

// Set panic hook for better error messages in browser
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

// Use smaller allocator for WASM
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Outcome of a parse for JavaScript interop
#[wasm_bindgen]
#[derive(Debug)]
pub struct ParseOutcome {
    success: bool,
    output: String,
    error: Option<String>,
}

#[wasm_bindgen]
impl ParseOutcome {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    /// The tree dump, empty on failure
    #[wasm_bindgen(getter)]
    pub fn output(&self) -> String {
        self.output.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Parse markup and return its tree dump
#[wasm_bindgen]
pub fn parse_markup(source: &str) -> ParseOutcome {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    match parse(source) {
        Ok(root) => ParseOutcome {
            success: true,
            output: tree_dump(&root),
            error: None,
        },
        Err(e) => ParseOutcome {
            success: false,
            output: String::new(),
            error: Some(e.format_with_context(source)),
        },
    }
}

/// Parse markup and return the tree as a plain JavaScript object
#[wasm_bindgen]
pub fn parse_tree(source: &str) -> Result<JsValue, JsValue> {
    let root = parse(source).map_err(|e| JsValue::from_str(&e.format_with_context(source)))?;
    serde_wasm_bindgen::to_value(&root).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
