// Domain layer: alert/chat models and the store port. No driver types leak in here.

pub mod model;
pub mod ports;
