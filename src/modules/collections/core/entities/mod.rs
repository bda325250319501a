pub mod admin;
pub mod review;
pub mod user;

pub use admin::Admin;
pub use review::Review;
pub use user::User;
