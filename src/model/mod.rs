//! Pure data structures: the stores' state ([`Cart`], [`UserState`]) and the
//! restaurant API's resources ([`MenuItem`], [`OrderRecord`]).

pub mod cart;
pub mod menu;
pub mod order;
pub mod user;

pub use cart::*;
pub use menu::*;
pub use order::*;
pub use user::*;
