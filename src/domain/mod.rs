// Domain layer: audit models, the inspection request and ports (interfaces).

pub mod model;
pub mod ports;
pub mod request;
