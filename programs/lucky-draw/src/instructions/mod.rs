pub mod admin;
pub mod commit_randomness;
pub mod reset_draw;
pub mod reveal_prize;
pub mod settings;
pub mod settle_draw;
pub mod shuffle;
pub mod trigger_draw;

pub use admin::*;
pub use commit_randomness::*;
pub use reset_draw::*;
pub use reveal_prize::*;
pub use settings::*;
pub use settle_draw::*;
pub use shuffle::*;
pub use trigger_draw::*;
