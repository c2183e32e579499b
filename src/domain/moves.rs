//! Reconciles a drag gesture (dragged item, drop target) into a board change.
//!
//! A drop target is either a bucket id or the id of an item inside some
//! bucket. Bucket ids win when both could match. Every applied plan moves
//! exactly one item; all other items keep their relative order.

use crate::domain::board::Board;
use std::fmt;

/// How much of the move algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveMode {
    /// Live feedback while hovering: only drops onto a bucket are applied
    Preview,
    /// Final placement when the drag ends
    Commit,
}

/// A resolved move, expressed in board indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePlan {
    /// Dropped onto a bucket: append to the end of it
    Append {
        from_bucket: usize,
        from_index: usize,
        to_bucket: usize,
    },
    /// Dropped onto another item of the same bucket
    Reorder {
        bucket: usize,
        from_index: usize,
        to_index: usize,
    },
    /// Dropped onto an item of another bucket: take that item's slot
    Insert {
        from_bucket: usize,
        from_index: usize,
        to_bucket: usize,
        to_index: usize,
    },
}

/// Why a move left the board unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSkip {
    SourceNotFound,
    TargetNotFound,
    DroppedOnSelf,
    /// Dropped onto its own bucket while already last in it
    AlreadyInPlace,
    /// Hovering over an item does not rearrange anything until the drop
    PreviewOverItem,
}

impl fmt::Display for MoveSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound => write!(f, "dragged item is not on the board"),
            Self::TargetNotFound => write!(f, "drop target is neither a bucket nor an item"),
            Self::DroppedOnSelf => write!(f, "item dropped onto itself"),
            Self::AlreadyInPlace => write!(f, "item is already at the end of its bucket"),
            Self::PreviewOverItem => write!(f, "preview ignores item targets"),
        }
    }
}

/// Resolves a move without touching the board
pub(crate) fn plan_move(board: &Board, active: &str, over: &str, mode: MoveMode) -> Result<MovePlan, MoveSkip> {
    let from_bucket = board
        .bucket_index_of_item(active)
        .ok_or(MoveSkip::SourceNotFound)?;
    let from_index = board.buckets[from_bucket]
        .position_of(active)
        .ok_or(MoveSkip::SourceNotFound)?;

    let target_bucket = board.bucket_index(over);
    let to_bucket = target_bucket
        .or_else(|| board.bucket_index_of_item(over))
        .ok_or(MoveSkip::TargetNotFound)?;

    if active == over {
        return Err(MoveSkip::DroppedOnSelf);
    }

    if target_bucket.is_some() {
        if to_bucket == from_bucket && from_index + 1 == board.buckets[from_bucket].items.len() {
            return Err(MoveSkip::AlreadyInPlace);
        }
        return Ok(MovePlan::Append {
            from_bucket,
            from_index,
            to_bucket,
        });
    }

    if mode == MoveMode::Preview {
        return Err(MoveSkip::PreviewOverItem);
    }

    let to_index = board.buckets[to_bucket]
        .position_of(over)
        .ok_or(MoveSkip::TargetNotFound)?;

    if from_bucket == to_bucket {
        Ok(MovePlan::Reorder {
            bucket: from_bucket,
            from_index,
            to_index,
        })
    } else {
        Ok(MovePlan::Insert {
            from_bucket,
            from_index,
            to_bucket,
            to_index,
        })
    }
}

impl Board {
    /// Applies a plan produced by [`plan_move`]. Indices are checked again, so
    /// a plan that no longer fits the board leaves it untouched.
    pub(crate) fn apply_move(&mut self, plan: MovePlan) -> Result<(), MoveSkip> {
        match plan {
            MovePlan::Append {
                from_bucket,
                from_index,
                to_bucket,
            } => {
                self.check_source(from_bucket, from_index)?;
                if to_bucket >= self.buckets.len() {
                    return Err(MoveSkip::TargetNotFound);
                }
                let item = self.buckets[from_bucket].items.remove(from_index);
                self.buckets[to_bucket].items.push(item);
            }
            MovePlan::Reorder {
                bucket,
                from_index,
                to_index,
            } => {
                self.check_source(bucket, from_index)?;
                let items = &mut self.buckets[bucket].items;
                if to_index >= items.len() {
                    return Err(MoveSkip::TargetNotFound);
                }
                let item = items.remove(from_index);
                items.insert(to_index, item);
            }
            MovePlan::Insert {
                from_bucket,
                from_index,
                to_bucket,
                to_index,
            } => {
                self.check_source(from_bucket, from_index)?;
                let dest_len = self
                    .buckets
                    .get(to_bucket)
                    .map(|bucket| bucket.items.len())
                    .ok_or(MoveSkip::TargetNotFound)?;
                let room = if to_bucket == from_bucket { dest_len - 1 } else { dest_len };
                if to_index > room {
                    return Err(MoveSkip::TargetNotFound);
                }
                let item = self.buckets[from_bucket].items.remove(from_index);
                self.buckets[to_bucket].items.insert(to_index, item);
            }
        }
        Ok(())
    }

    fn check_source(&self, bucket: usize, index: usize) -> Result<(), MoveSkip> {
        match self.buckets.get(bucket) {
            Some(bucket) if index < bucket.items.len() => Ok(()),
            _ => Err(MoveSkip::SourceNotFound),
        }
    }

    /// Runs the full move algorithm for a completed drop
    pub fn move_item(&mut self, active: &str, over: &str) -> Result<MovePlan, MoveSkip> {
        let plan = plan_move(self, active, over, MoveMode::Commit)?;
        self.apply_move(plan)?;
        Ok(plan)
    }

    /// Runs the hover-time subset of the move algorithm
    pub fn preview_move(&mut self, active: &str, over: &str) -> Result<MovePlan, MoveSkip> {
        let plan = plan_move(self, active, over, MoveMode::Preview)?;
        self.apply_move(plan)?;
        Ok(plan)
    }
}
