use bevy::log::{error, info};
use bevy::prelude::{EventWriter, ResMut};
use stratagraph_core::Dataset;

use crate::app::events::FitToView;
use crate::graph::state::{GraphState, LoadStatus};

/// Startup: read the dataset once. Failures are logged and leave an empty scene.
pub fn load_dataset(mut st: ResMut<GraphState>, mut fit: EventWriter<FitToView>) {
    let path = st.cfg.dataset_path.clone();
    match Dataset::from_path(&path) {
        Ok(dataset) => {
            st.install(dataset);
            if let LoadStatus::Loaded { nodes, connections } = st.ui.status {
                info!(
                    "loaded {} ({nodes} nodes, {connections} connections, {} layers)",
                    path.display(),
                    st.graph.layers().len()
                );
            }
            fit.send(FitToView);
        }
        Err(err) => {
            error!("error loading data: {err}");
            st.load_failed(err.to_string());
        }
    }
}
