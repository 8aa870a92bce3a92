pub mod actor_context;
pub mod owner;
pub mod policy;
pub mod recorder;
