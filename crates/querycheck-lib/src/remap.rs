//! Position remapping from analyzed text back to the enclosing source.
//!
//! The analyzed text is either the literal's contents or its shorthand
//! expansion. In the latter, the original filter fragment starts at the
//! expansion offset. A text position `p` therefore sits at literal position
//! `p - offset`, and the literal's contents start one past its opening
//! delimiter in the enclosing source.

use rowan::{TextRange, TextSize};

/// Where a query literal sits in its enclosing source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiteralOrigin {
    /// Offset of the literal's opening delimiter in the enclosing source.
    pub literal_start: u32,
    /// Offset of the original fragment within the analyzed text.
    pub expansion_offset: u32,
}

impl LiteralOrigin {
    pub fn new(literal_start: u32, expansion_offset: u32) -> Self {
        Self {
            literal_start,
            expansion_offset,
        }
    }

    pub fn remap(&self, span: TextRange) -> TextRange {
        remap(self.literal_start, span, self.expansion_offset)
    }
}

/// Map `span` (against the analyzed text) to a span in the enclosing source.
///
/// Positions before the original fragment (inside generated prefix text)
/// clamp to the literal's first character; an inverted result collapses to
/// an empty span at its start.
pub fn remap(literal_start: u32, span: TextRange, expansion_offset: u32) -> TextRange {
    let shift = |pos: TextSize| -> i64 { i64::from(u32::from(pos)) - i64::from(expansion_offset) };

    let start = shift(span.start()).max(0);
    let end = shift(span.end()).max(start);

    let base = i64::from(literal_start) + 1;
    TextRange::new(to_size(base + start), to_size(base + end))
}

fn to_size(pos: i64) -> TextSize {
    TextSize::from(u32::try_from(pos).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn unexpanded_literal_shifts_past_delimiter() {
        // let q = "FROM Person";  literal opens at 8
        assert_eq!(remap(8, range(5, 11), 0), range(14, 20));
    }

    #[test]
    fn filter_region_shifts_by_origin_minus_offset() {
        // "FROM Person WHERE name = ?1", filter `name` starts at 18
        let span = range(18, 22);
        let remapped = remap(100, span, 18);
        assert_eq!(remapped, range(101, 105));
    }

    #[test]
    fn round_trip_property() {
        let literal_start = 40;
        let offset = 18;
        for (s, e) in [(18, 19), (20, 25), (30, 30)] {
            let remapped = remap(literal_start, range(s, e), offset);
            let delta = literal_start + 1 - offset;
            assert_eq!(remapped, range(s + delta, e + delta));
        }
    }

    #[test]
    fn prefix_positions_clamp_to_literal_start() {
        // Span covering `FROM Person` of a generated prefix
        assert_eq!(remap(10, range(0, 11), 18), range(11, 11));
    }

    #[test]
    fn straddling_span_keeps_its_end() {
        assert_eq!(remap(10, range(12, 22), 18), range(11, 15));
    }

    #[test]
    fn origin_wrapper_matches_function() {
        let origin = LiteralOrigin::new(7, 3);
        assert_eq!(origin.remap(range(4, 6)), remap(7, range(4, 6), 3));
    }
}
