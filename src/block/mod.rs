/*!
 * Block Module
 * Blocks, the arena that stores them, and the ordered collections
 */

pub mod arena;
pub mod list;
pub mod types;

pub use arena::{BlockArena, BlockHandle};
pub use list::BlockList;
pub use types::{Block, Collection};
