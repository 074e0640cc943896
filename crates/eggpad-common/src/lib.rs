#![no_std]

mod devlog;

pub use log as __log;

/// Number of frames a command lasts, as counted by the playback engine.
pub type Frames = u16;
