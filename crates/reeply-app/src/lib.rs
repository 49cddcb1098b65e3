// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod model;
pub mod pager;
pub mod state;
pub mod timeline;

pub use model::*;
pub use pager::*;
pub use state::*;
pub use timeline::*;
