// Domain layer: core models, the known domain set and ports (interfaces).

pub mod domains;
pub mod model;
pub mod ports;
