// Domain layer: models and the store port. No framework types here.

pub mod model;
pub mod ports;
