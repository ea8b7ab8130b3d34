//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: screen selection (gate-driven), layout and overlays
//! - `input`: keyboard event handling
//! - `styles`: color schemes and text styling
//! - `tabs`: tab-specific content rendering

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
