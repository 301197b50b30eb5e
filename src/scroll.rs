//! Scroll-driven UI flags and anchor targets.
//!
//! Offsets are in abstract scroll units (pixels in a browser). The terminal
//! host converts list rows with [`ROW_HEIGHT`].

/// Back-to-top control appears past this offset.
pub const BACK_TO_TOP_THRESHOLD: u32 = 300;

/// Header switches to its compact form past this offset.
pub const HEADER_SHRINK_THRESHOLD: u32 = 50;

/// Height of the fixed header, subtracted when jumping to an anchor.
pub const HEADER_OFFSET: u32 = 80;

/// Scroll units per list row in the terminal host.
pub const ROW_HEIGHT: u32 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollFlags {
    pub back_to_top_visible: bool,
    pub header_scrolled: bool,
}

impl ScrollFlags {
    pub fn at(offset: u32) -> Self {
        Self {
            back_to_top_visible: offset > BACK_TO_TOP_THRESHOLD,
            header_scrolled: offset > HEADER_SHRINK_THRESHOLD,
        }
    }
}

/// Where to scroll so an element at `element_top` (relative to the viewport)
/// lands just below the fixed header.
pub fn anchor_target(element_top: i64, page_offset: u32) -> u32 {
    let target = element_top + i64::from(page_offset) - i64::from(HEADER_OFFSET);
    u32::try_from(target.max(0)).unwrap_or(u32::MAX)
}
