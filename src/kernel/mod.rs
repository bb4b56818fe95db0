pub mod action;
pub mod event;
pub mod reactor;
pub mod scheduler;
pub mod state;
pub mod target;
pub mod telemetry;
pub mod time;
pub mod timers;
pub mod weapon;
pub mod world;
