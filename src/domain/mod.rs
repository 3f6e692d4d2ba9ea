// Domain layer: platform objects, request parameters and the client port.

pub mod fullname;
pub mod model;
pub mod params;
pub mod ports;
