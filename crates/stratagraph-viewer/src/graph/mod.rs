pub mod curve;
pub mod load;
pub mod placement;
pub mod scene;
pub mod selection;
pub mod state;

pub use load::load_dataset;
pub use selection::{HoverSource, NodeTone};
pub use state::GraphState;
