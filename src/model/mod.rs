pub use genesis_core::brain::BrainLogic;
pub use genesis_core::genome::GenomeLogic;
pub use genesis_core::signal::SignalLogic;
pub use genesis_core::{TickOutcome, Universe};

pub mod brain {
    pub use genesis_core::brain::*;
}
pub mod config {
    pub use genesis_core::config::*;
}
pub mod energy_field {
    pub use genesis_core::energy_field::*;
}
pub mod genome {
    pub use genesis_core::genome::*;
}
pub mod geometry {
    pub use genesis_core::geometry::*;
}
pub mod lifecycle {
    pub use genesis_core::lifecycle::*;
}
pub mod metrics {
    pub use genesis_core::metrics::*;
}
pub mod signal {
    pub use genesis_core::signal::*;
}
pub mod snapshot {
    pub use genesis_core::snapshot::*;
}
pub mod systems {
    pub use genesis_core::systems::*;
}
pub mod universe {
    pub use genesis_core::universe::*;
}
pub mod persistence {
    pub use genesis_io::*;
}

pub mod state {
    pub use genesis_data::*;
}
