// Domain layer: grant models and the ports the matcher consumes.

pub mod model;
pub mod ports;
