//! Text layout for terminal surfaces.
//!
//! Two line-breaking behaviors live here and are intentionally not unified:
//! - [`wrap_to_width`]: static greedy wrap against an absolute column budget,
//!   used for self-contained blocks (side panels).
//! - [`flow_from_cursor`]: live flow that starts from the current cursor
//!   column, used when printing into a row that may already hold output.
//!
//! All widths are terminal cells (see [`width`]).

pub mod flow;
pub mod width;
pub mod wrap;

pub use flow::flow_from_cursor;
pub use width::{split_at_width, str_width};
pub use wrap::{GreedySplitter, LineSplitter, wrap_to_width};
