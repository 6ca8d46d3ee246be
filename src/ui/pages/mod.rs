pub mod about;
pub mod home;
pub mod impact;
pub mod post_waste;
pub mod profile;
pub mod search;
