// Service module exports

pub mod catalog;
pub mod color;
pub mod drag;
pub mod interaction;
pub mod settings;
pub mod tables;
