pub mod partition;
pub mod pass;
pub mod ports;
pub mod work_unit;
pub mod worker_pool;
