mod component;
mod export;
mod panels;
mod render;
mod state;
mod types;

pub use component::GraphEditor;
