pub use super::messages::Entity as Messages;
pub use super::threads::Entity as Threads;
