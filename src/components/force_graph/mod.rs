mod component;
mod render;
pub mod scale;
mod state;
mod types;

pub use component::GraphCanvas;
pub use types::Layout;
