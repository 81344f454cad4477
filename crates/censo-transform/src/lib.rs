//! Schema normalization and type coercion.
//!
//! Two stages, run per (source, year) cell:
//!
//! 1. **Normalize**: reconcile a raw frame's physical layout (positional
//!    identifier columns, base-specific extras, wide group blocks) into the
//!    canonical long layout, guarded against schema drift by the mapping
//!    registry.
//! 2. **Coerce**: apply canonical types with explicit unknown handling —
//!    sentinel 9 flags become null, absent counts become zero, categorical
//!    codes recode through the registry or become null, never raw.
//!
//! Both stages are pure frame-in/frame-out functions; all I/O lives in the
//! ingest and store crates.

mod coerce;
mod error;
mod normalize;

pub use coerce::coerce;
pub use error::{Result, TransformError};
pub use normalize::{concat_bases, normalize_indicator, normalize_microdados};
