pub mod cards;
pub mod games;
pub mod players;
pub mod rooms;

pub use cards::Entity as Cards;
pub use games::Entity as Games;
pub use players::Entity as Players;
pub use rooms::Entity as Rooms;
