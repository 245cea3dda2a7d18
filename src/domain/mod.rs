//! Domain types shared by both landing flows: the extracted parameters, the
//! deep-link targets built from them and the handoff phases.

pub mod params;
pub mod ports;
pub mod state;
pub mod target;
