//! Planar convex hulls with a replayable construction trace.
//!
//! Two independent engines share one point model and one output contract:
//! - `quickhull`: parallel divide-and-conquer, returns an unordered vertex set.
//! - `giftwrap`: gift wrapping (Jarvis march) with a parallel best-next scan,
//!   returns the vertices in path order.
//!
//! Both emit a `Trace` of `Step`s (point selections and edges) in the order the
//! algorithm committed to them, for later playback.
//!
//! Conventions
//! - Orientation is `point::cross_product`: positive means left of the directed line.
//! - Exact coordinate equality everywhere (no epsilons). Collinear boundary points
//!   are not hull vertices.
//! - Fewer than 3 input points is a degenerate input, not an error: empty hull, empty trace.

pub mod cfg;
pub mod field;
pub mod giftwrap;
pub mod point;
pub mod polygon;
pub mod quickhull;
pub mod trace;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::HullCfg;
pub use giftwrap::{gift_wrap, gift_wrap_with};
pub use point::{cross_product, orientation, Orientation, Point};
pub use quickhull::{quick_hull, quick_hull_with};
pub use trace::{Step, Trace};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::HullCfg;
    pub use crate::field::{generate_field, parse_points, read_points, FieldCfg, FieldError};
    pub use crate::giftwrap::{gift_wrap, gift_wrap_with};
    pub use crate::point::{cross_product, orientation, Orientation, Point};
    pub use crate::polygon::{encloses, sort_ccw};
    pub use crate::quickhull::{quick_hull, quick_hull_with};
    pub use crate::trace::{Step, Trace};
}
