//! GPIO initialisation and task-spawning helpers.

pub mod hw_init;
pub mod task_pin;
