//! Carioca scorekeeping engine. Keep this crate free of IO and platform
//! concerns: storage and card recognition come in through traits.

pub mod cards;
pub mod events;
pub mod game;
pub mod persistence;
pub mod player;
pub mod rounds;
pub mod scan;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod standings;
pub mod state;
pub mod storage;

pub use cards::*;
pub use events::*;
pub use game::*;
pub use persistence::*;
pub use player::*;
pub use rounds::*;
pub use scan::*;
pub use scoring::*;
pub use session::*;
pub use settings::*;
pub use standings::*;
pub use state::*;
pub use storage::*;
