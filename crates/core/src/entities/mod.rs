pub mod prelude;

pub mod messages;
pub mod threads;
