// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod input;
pub mod keymap;
pub mod keys;
pub mod list;
pub mod model;
pub mod state;

pub use input::*;
pub use keymap::KeymapKind;
pub use keys::*;
pub use list::*;
pub use model::*;
pub use state::*;
