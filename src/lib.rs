pub use cgmath;
pub use collision::collides;
pub use configuration::{Configuration, Green};
pub use error::PhaseError;
pub use graph::LaneGraph;
pub use junction::{Junction, Lane, LaneAttributes, LaneDirection, LaneKind, Road, Sign};
pub use light::{LightState, TrafficLight, TrafficLightAttributes};
pub use phases::{
    compute_sign_configurations, maximal_configurations, Enumeration, Phase, PhaseOptions,
    PhaseTable,
};
use slotmap::new_key_type;
pub use slotmap::{Key, KeyData};

mod collision;
mod conflict;
mod configuration;
#[cfg(feature = "debug")]
mod debug;
mod error;
mod graph;
mod junction;
mod light;
pub mod math;
mod phases;
mod util;

#[cfg(feature = "debug")]
pub use debug::take_debug_trace;

new_key_type! {
    /// Unique ID of a [Lane].
    pub struct LaneId;
    /// Unique ID of a [Road].
    pub struct RoadId;
    /// Unique ID of a [Sign].
    pub struct SignId;
}
