pub mod object;
pub mod request;
pub mod workflow;
