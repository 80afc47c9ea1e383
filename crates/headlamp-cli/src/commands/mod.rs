pub mod applications;
pub mod chat;
pub mod identity;
mod review;
