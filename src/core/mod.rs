pub mod config;
pub mod connectivity;
pub mod constants;
pub mod conversation;
pub mod dispatch;
pub mod lookup;
pub mod message;
pub mod pipeline;
pub mod projector;
pub mod store;
