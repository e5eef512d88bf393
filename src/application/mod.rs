//! Application services layer: the render pipeline and its error surface.

pub mod error;
pub mod merger;
pub mod render;
