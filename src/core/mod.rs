pub mod engine;
pub mod pipeline;
pub mod render;
pub mod tiles;

pub use crate::domain::model::{MapView, RenderedMap, TileLayer};
pub use crate::domain::ports::{ConfigProvider, Exporter, Storage};
pub use crate::utils::error::Result;
