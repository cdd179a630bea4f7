//! Host application for the terrain generator: platform directories, the
//! frame loop that drives generation runs, and the generate trigger surface.

pub mod frame_loop;
pub mod platform;
pub mod session;
