use serde::Serialize;

/// One inclusive numeric range with its display label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub start: f64,
    pub end: f64,
    pub label: &'static str,
}

impl Bucket {
    const fn new(start: f64, end: f64, label: &'static str) -> Self {
        Bucket { start, end, label }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// An ordered, contiguous list of buckets plus the label used past the last one.
///
/// Policy for values outside the covered domain:
///
/// | Value                      | Result            |
/// |----------------------------|-------------------|
/// | below the first `start`    | first bucket      |
/// | inside `[start, end]`      | first match       |
/// | above the last `end`       | `overflow` bucket |
#[derive(Debug, Clone, Copy)]
pub struct BucketTable {
    pub buckets: &'static [Bucket],
    pub overflow: &'static str,
}

/// How a bucketed value is reported to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketMode {
    Label,
    Midpoint,
}

/// A bucketed numeric field, either as the range label or as the range midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BucketValue {
    Label(&'static str),
    Midpoint(f64),
}

impl BucketValue {
    pub fn as_midpoint(&self) -> Option<f64> {
        match self {
            BucketValue::Midpoint(m) => Some(*m),
            BucketValue::Label(_) => None,
        }
    }
}

pub const ODOMETER_BUCKETS: &[Bucket] = &[
    Bucket::new(0.0, 1_000.0, "0-1000 miles"),
    Bucket::new(1_000.0, 5_000.0, "1000-5000 miles"),
    Bucket::new(5_000.0, 10_000.0, "5000-10000 miles"),
    Bucket::new(10_000.0, 20_000.0, "10000-20000 miles"),
    Bucket::new(20_000.0, 40_000.0, "20000-40000 miles"),
    Bucket::new(40_000.0, 60_000.0, "40000-60000 miles"),
    Bucket::new(60_000.0, 80_000.0, "60000-80000 miles"),
    Bucket::new(80_000.0, 100_000.0, "80000-100000 miles"),
    Bucket::new(100_000.0, 120_000.0, "100000-120000 miles"),
    Bucket::new(120_000.0, 160_000.0, "120000-160000 miles"),
    Bucket::new(160_000.0, 180_000.0, "160000-180000 miles"),
    Bucket::new(180_000.0, 200_000.0, "180000-200000 miles"),
];

pub const PRICE_BUCKETS: &[Bucket] = &[
    Bucket::new(0.0, 1_000.0, "$0-$1000"),
    Bucket::new(1_000.0, 5_000.0, "$1000-$5000"),
    Bucket::new(5_000.0, 10_000.0, "$5000-$10000"),
    Bucket::new(10_000.0, 20_000.0, "$10000-$20000"),
    Bucket::new(20_000.0, 30_000.0, "$20000-$30000"),
    Bucket::new(30_000.0, 40_000.0, "$30000-$40000"),
    Bucket::new(40_000.0, 50_000.0, "$40000-$50000"),
    Bucket::new(50_000.0, 60_000.0, "$50000-$60000"),
];

pub const ODOMETER_TABLE: BucketTable = BucketTable {
    buckets: ODOMETER_BUCKETS,
    overflow: "200000+ miles",
};

pub const PRICE_TABLE: BucketTable = BucketTable {
    buckets: PRICE_BUCKETS,
    overflow: "$60000+",
};

impl BucketTable {
    /// Position of `value` in the table; `buckets.len()` means overflow.
    pub fn index_of(&self, value: f64) -> usize {
        if let Some(first) = self.buckets.first() {
            if value < first.start {
                return 0;
            }
        }
        self.buckets
            .iter()
            .position(|b| b.contains(value))
            .unwrap_or(self.buckets.len())
    }

    pub fn label(&self, value: f64) -> &'static str {
        self.label_at(self.index_of(value))
    }

    /// Label for a position returned by [`Self::index_of`].
    pub fn label_at(&self, index: usize) -> &'static str {
        match self.buckets.get(index) {
            Some(b) => b.label,
            None => self.overflow,
        }
    }

    /// Midpoint of the matched bucket. The overflow bucket is treated as
    /// extending half a last-bucket width past the final `end`.
    pub fn midpoint(&self, value: f64) -> f64 {
        match self.buckets.get(self.index_of(value)) {
            Some(b) => b.midpoint(),
            None => match self.buckets.last() {
                Some(last) => last.end + (last.end - last.start) / 2.0,
                None => value,
            },
        }
    }

    pub fn bucket(&self, value: f64, mode: BucketMode) -> BucketValue {
        match mode {
            BucketMode::Label => BucketValue::Label(self.label(value)),
            BucketMode::Midpoint => BucketValue::Midpoint(self.midpoint(value)),
        }
    }
}
