//! Schedule math — overlap and containment over meeting blocks.
//!
//! Pure functions, no I/O, fully deterministic. Used both for conflict
//! detection against a caller's busy blocks and for "fits inside my free
//! time" searches.

use cs_protocol::{ClassSection, MeetingBlock, TimeWindow};

/// True iff the block and window share at least one day AND their minute
/// ranges intersect. Touching endpoints (one ends exactly when the other
/// starts) do not count as overlap.
pub fn overlaps(block: &MeetingBlock, window: &TimeWindow) -> bool {
    block.days.intersects(window.days)
        && block.start_minute < window.end_minute
        && window.start_minute < block.end_minute
}

/// True iff any meeting block of the section overlaps any busy block.
///
/// A section with no meeting blocks (asynchronous) never conflicts.
pub fn conflicts_with_any(section: &ClassSection, busy: &[TimeWindow]) -> bool {
    section
        .meetings
        .iter()
        .any(|block| busy.iter().any(|b| overlaps(block, b)))
}

/// True iff the block is fully contained in the window: its days are a
/// subset of the window's days and its minute range lies inside the
/// window's range. A block with no days is vacuously contained nowhere —
/// but such blocks only occur on asynchronous sections, which are handled
/// at the section level.
fn contained_in(block: &MeetingBlock, window: &TimeWindow) -> bool {
    block.days.is_subset_of(window.days)
        && block.start_minute >= window.start_minute
        && block.end_minute <= window.end_minute
}

/// True iff every meeting block of the section fits inside at least one
/// of the supplied free windows.
///
/// Containment is evaluated per block: a section whose blocks span two
/// different windows on different days still qualifies. A section with no
/// meeting blocks always fits — asynchronous sections pass schedule
/// filters trivially, by policy.
pub fn fits_within_any(section: &ClassSection, free: &[TimeWindow]) -> bool {
    section
        .meetings
        .iter()
        .all(|block| free.iter().any(|w| contained_in(block, w)))
}
