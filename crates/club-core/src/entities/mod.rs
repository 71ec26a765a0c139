//! Domain entities

mod club;
mod membership;
mod user;

pub use club::{Club, NewClub};
pub use membership::{ClubMember, Membership, UserClubRole};
pub use user::{NewUser, User};
