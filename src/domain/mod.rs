// Domain layer: map models and ports (interfaces).

pub mod model;
pub mod ports;
