//! Sorted containers: the red-black tree map, its set layer, and live
//! range and descending views.

pub mod map;
pub mod set;

pub use map::{RangeView, TreeMap};
pub use set::{SetView, TreeSet};
