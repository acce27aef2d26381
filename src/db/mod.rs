pub mod categories;
pub mod follows;
pub mod notifications;
pub mod posts;
pub mod roles;
pub mod tags;
pub mod users;
