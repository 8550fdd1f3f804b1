// src/core/mod.rs

pub mod interpolator;
pub mod reporter;
pub mod text;
