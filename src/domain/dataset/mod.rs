//! Dataset Module - Tabular input supplied by the caller.
//!
//! # Components
//!
//! - `Dataset` - Column name -> values table with aligned rows
//! - `Value` - A single untyped cell (bool, integer, float, text, null)
//! - `Observation` - One individual-level row (outcome, treatment, segment)
//! - `ObservationColumns` / `CountColumns` - Caller-designated column names

mod columns;
mod observation;
mod table;
mod value;

pub use columns::{CountColumns, ObservationColumns};
pub use observation::Observation;
pub use table::{Dataset, DatasetBuilder};
pub(crate) use table::labels_in;
pub use value::Value;
