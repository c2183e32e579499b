pub mod board;
pub mod bucket;
pub mod item;
pub mod moves;

pub use board::Board;
pub use bucket::{Bucket, BucketId};
pub use item::{Item, ItemId, ItemUpdate};
pub use moves::{MovePlan, MoveSkip};
