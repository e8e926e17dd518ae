//! Emoji picker unit
//!
//! The picker presents a filterable emoji list and turns a selection into
//! a reaction request plus a navigate-back signal.

pub mod code_points;
pub mod filter;
pub mod picker;

pub use filter::filter_emoji_list;
pub use picker::{EmojiPicker, Navigator, ReactionSink};
