// Domain layer: draws, lottery games and the ports the engine depends on.

pub mod format;
pub mod model;
pub mod ports;
