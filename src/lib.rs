pub mod config;
pub mod kernel;
pub mod task;

pub use config::Config;
pub use kernel::reactor::Reactor;
pub use kernel::scheduler::Scheduler;
