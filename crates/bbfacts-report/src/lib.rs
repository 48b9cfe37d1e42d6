//! Broadband Facts output generation.
//!
//! - **SVG labels**: one document per [`bbfacts_model::LabelRecord`]
//! - **Sinks**: where rendered documents are written
//! - **Archive**: a ZIP of every label in an output directory

pub mod archive;
mod canvas;
mod common;
pub mod label_svg;
pub mod layout;
pub mod sink;

pub use archive::archive_labels;
pub use common::{LABEL_WIDTH, unique_plan_identifier};
pub use label_svg::{RenderedLabel, render_label};
pub use layout::LayoutCursor;
pub use sink::{DirectorySink, DocumentSink, WrittenLabel, write_labels};
