#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod artist;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod preview;
pub mod stroke;
pub mod surface;
pub mod texture;
pub mod tool;

pub use app::MiniArtistApp;
pub use artist::Artist;
pub use config::ArtistConfig;
pub use error::{ConfigError, ExportError};
pub use export::{Artwork, ExportSink};
pub use input::{InputEvent, PointerHandler, PointerSample, RawPointer};
pub use preview::CursorPreview;
pub use stroke::StrokeRenderer;
pub use surface::{CompositeMode, Surface};
pub use tool::{ToolKind, ToolState, ToolStyle};
