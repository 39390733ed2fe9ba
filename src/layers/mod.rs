pub mod marker;

pub use marker::{DisplayedMarker, MarkerId, MarkerLayer, MarkerSpec};
