// Domain layer: sitemap models and ports (interfaces). No IO here.

pub mod model;
pub mod ports;
