//! Database repositories.

mod following;
mod music_account;
mod user;

pub use following::FollowingRepository;
pub use music_account::MusicAccountRepository;
pub use user::UserRepository;
