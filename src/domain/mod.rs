// Domain layer: read models and the ports the checks depend on.

pub mod model;
pub mod ports;
