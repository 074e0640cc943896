#![no_std]

pub mod action;
pub mod command;
pub mod config;
pub mod executor;
pub mod hid;
pub mod report;
pub mod routines;
pub mod session;
pub mod synth;
pub mod tracker;
pub mod transport;
