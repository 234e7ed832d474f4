//! Typed results decoded from the service's feeds.

mod account;
mod data_point;
mod data_set;
mod segment;

pub use account::{Account, Goal};
pub use data_point::{DataPoint, Dimension, Metric};
pub use data_set::DataSet;
pub use segment::Segment;
