//! Skycast application shell
//!
//! Wires the catalog, settings, weather clients, cache, and cooldown timer
//! into the fetch workflow and exposes the message-based render contract
//! consumed by the rendering surface.

pub mod controller;
pub mod cooldown;
pub mod error_mapping;
pub mod render;
pub mod theme;

pub use controller::{Controller, ViewMessage};
pub use cooldown::{CooldownState, COOLDOWN_SECS};
pub use theme::Theme;
