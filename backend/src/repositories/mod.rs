pub mod friendships;
pub mod messages;
pub mod sessions;
pub mod users;
