pub mod accounts;
pub mod feed;
pub mod follow;
pub mod policy;
pub mod posts;
pub mod rbac;
pub mod slug;
