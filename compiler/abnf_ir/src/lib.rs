//! ABNF IR - shared source-location types.
//!
//! Every crate in the toolkit talks about positions the same way:
//! - [`Span`]: a half-open range of offsets into a source buffer
//! - [`LineIndex`]: maps offsets back to 1-based line/column pairs
//!
//! Offsets are measured in the unit of the buffer that produced them. Grammar
//! files are lexed as UTF-8 bytes; parser input is a `char` sequence, so spans
//! coming out of the combinator runtime count characters.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod line_index;
mod span;

pub use line_index::{LineCol, LineIndex};
pub use span::{Span, SpanError};
