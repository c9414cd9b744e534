//! Pixel effects: box-blur Gaussian approximation, drop shadow and source-over compositing.

pub mod blur;
pub mod composite;
pub mod shadow;
