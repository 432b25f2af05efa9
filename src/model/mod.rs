pub mod config {
    pub use ecosim_core::config::*;
}
pub mod ecs {
    pub use ecosim_core::ecs::*;
}
pub mod events {
    pub use ecosim_core::events::*;
}
pub mod lifecycle {
    pub use ecosim_core::lifecycle::*;
}
pub mod metrics {
    pub use ecosim_core::metrics::*;
}
pub mod spatial_hash {
    pub use ecosim_core::spatial_hash::*;
}
pub mod systems {
    pub use ecosim_core::systems::*;
}
pub mod definitions {
    pub use ecosim_io::definitions::*;
}

pub mod world;
