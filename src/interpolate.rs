/// One straight-line piece of a [`Table`].
///
/// Covers inputs in `low < x <= high` and evaluates to
/// `offset + rise * (x - origin) / run`, truncated toward zero.
///
/// `origin` is usually equal to `low`, but is kept separate so that
/// calibration data anchored elsewhere can be used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub low: i32,
    pub high: i32,
    pub rise: i32,
    pub run: i32,
    pub origin: i32,
    pub offset: i32,
}

impl Segment {
    /// Evaluates the segment's line at `x`, whether or not `x` is in range.
    pub const fn eval(&self, x: i32) -> i32 {
        (self.rise * (x - self.origin) + self.offset * self.run) / self.run
    }

    pub const fn contains(&self, x: i32) -> bool {
        x > self.low && x <= self.high
    }
}

/// An ordered set of contiguous [`Segment`]s.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    segments: &'static [Segment],
}

impl Table {
    /// Returns a table built from `segments`.
    ///
    /// Panics unless the table is non-empty, every `run` is positive,
    /// and each segment starts where the previous one ends. Used in a
    /// `const` item, a malformed table fails to compile.
    pub const fn new(segments: &'static [Segment]) -> Self {
        assert!(!segments.is_empty(), "table must have at least one segment");

        let mut index = 0;
        while index < segments.len() {
            let segment = &segments[index];
            assert!(segment.run > 0, "segment run must be positive");
            assert!(segment.low < segment.high, "segment bounds must ascend");
            if index > 0 {
                assert!(
                    segments[index - 1].high == segment.low,
                    "segments must be contiguous"
                );
            }
            index += 1;
        }

        Self { segments }
    }

    pub fn segments(&self) -> &'static [Segment] {
        self.segments
    }

    /// Exclusive lower bound of the table's domain.
    pub fn low(&self) -> i32 {
        self.segments[0].low
    }

    /// Inclusive upper bound of the table's domain.
    pub fn high(&self) -> i32 {
        self.segments[self.segments.len() - 1].high
    }

    /// Returns the interpolated value at `x`, or `None` if `x` is outside
    /// the table.
    pub fn lookup(&self, x: i32) -> Option<i32> {
        if x <= self.low() || x > self.high() {
            return None;
        }

        // Upper bounds are inclusive, so the first segment whose `high`
        // is not below `x` is the one that contains it.
        let index = self.segments.partition_point(|segment| segment.high < x);
        self.segments.get(index).map(|segment| segment.eval(x))
    }
}
