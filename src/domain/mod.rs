// Domain layer: content models and ports (interfaces). No knowledge of HTTP or files.

pub mod model;
pub mod ports;
