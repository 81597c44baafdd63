//! Platform-independent core of the editor: graph model, geometry, scale calibration,
//! relaxation engine, imports and export framing.

pub mod annotation;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod import;
pub mod model;
pub mod relax;
pub mod scale;
pub mod session;

pub use annotation::Annotation;
pub use config::EditorConfig;
pub use error::{EditorError, Result};
pub use export::{EXPORT_MARGIN, ExportFrame};
pub use geometry::{Arrowhead, DEFAULT_ARROW_SIZE, Point, arrowhead_points, distance};
pub use import::{BulkRow, Template, Topology, parse_weight};
pub use model::{EdgeAttrs, EdgeRef, Graph, NodeAttrs, NodeId, Positions};
pub use relax::{RelaxParams, relax};
pub use scale::{REFERENCE_PIXELS, Scale};
pub use session::EditorSession;
