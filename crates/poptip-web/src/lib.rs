#![forbid(unsafe_code)]

//! Browser binding for `poptip`.
//!
//! On `wasm32` this crate exports a `Tooltip` class through `wasm-bindgen`
//! backed by [`DomHost`], a [`poptip::Host`] over `web-sys`. The JS glue
//! publishes the class once with [`install`]:
//!
//! ```js
//! import init, { Tooltip, install } from "./poptip_web.js";
//! await init();
//! install(Tooltip);
//! new Tooltip({ trigger: document.querySelector("#save"), content: "Saved" });
//! ```
//!
//! Reading the JS options object is target independent and lives in
//! [`options`] so it can be tested natively.

pub mod options;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::DomHost;
#[cfg(target_arch = "wasm32")]
pub use wasm::{WebTooltip, install};
