//! Force-directed view of the site's link graph.

mod component;
pub mod layout;
pub mod loader;
pub mod palette;
mod render;
pub mod state;
pub mod types;

pub use component::ForceGraphCanvas;
pub use layout::ForceParams;
pub use loader::{GraphLoader, GraphSource, HttpGraphSource};
pub use palette::Palette;
pub use types::{GraphData, GraphLink, GraphNode};
