pub mod challenge_response;
pub mod device_key_manager;
pub mod device_pop_manager;
pub mod error;
pub mod worker_pool;
