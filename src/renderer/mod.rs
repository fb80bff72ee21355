//! Frame renderers
//!
//! Both renderers are pure projections of a `Frame`: a terminal grid for
//! native runs and absolutely positioned page elements in the browser.

pub mod text;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use text::TextRenderer;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
