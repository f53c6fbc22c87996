mod dataset;

pub use dataset::{coerce_numeric, Dataset};
