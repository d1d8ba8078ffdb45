//! Business logic services.

pub mod following;
pub mod music_link;
pub mod track;
pub mod user;

pub use following::FollowingService;
pub use music_link::{AuthorizeRedirect, MusicLinkService};
pub use track::{TrackService, TrackStatus, UpstreamTrack, normalize};
pub use user::{CreateUserInput, UpdateUserInput, UserService};
