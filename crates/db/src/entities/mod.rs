//! Database entities.

pub mod following;
pub mod music_account;
pub mod user;

pub use following::Entity as Following;
pub use music_account::Entity as MusicAccount;
pub use user::Entity as User;
