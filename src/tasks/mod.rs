pub mod poller;
pub mod results_monitor;
pub mod sources;
