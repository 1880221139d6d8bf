use super::PropertyRecord;

/// One side of a range constraint
///
/// `Unbounded` is a state of its own and never stands in for a numeric value,
/// so "no minimum" and "minimum of zero" stay distinct all the way into the
/// cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound<T> {
    Unbounded,
    At(T),
}

impl<T> Default for Bound<T> {
    fn default() -> Self {
        Self::Unbounded
    }
}

impl<T> From<Option<T>> for Bound<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::At(v),
            None => Self::Unbounded,
        }
    }
}

impl<T> Bound<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Bound<U> {
        match self {
            Self::Unbounded => Bound::Unbounded,
            Self::At(v) => Bound::At(f(v)),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl<T: PartialOrd> Bound<T> {
    /// Inclusive lower-bound check
    pub fn admits_from_below(&self, value: &T) -> bool {
        match self {
            Self::Unbounded => true,
            Self::At(min) => value >= min,
        }
    }

    /// Inclusive upper-bound check
    pub fn admits_from_above(&self, value: &T) -> bool {
        match self {
            Self::Unbounded => true,
            Self::At(max) => value <= max,
        }
    }
}

/// The six independent bounds applied to a market query
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterCriteria {
    pub min_price: Bound<f64>,
    pub max_price: Bound<f64>,
    pub min_bedrooms: Bound<i32>,
    pub max_bedrooms: Bound<i32>,
    pub min_school_rating: Bound<f64>,
    pub max_school_rating: Bound<f64>,
}

impl FilterCriteria {
    /// Criteria that admit every record
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.min_price.is_unbounded()
            && self.max_price.is_unbounded()
            && self.min_bedrooms.is_unbounded()
            && self.max_bedrooms.is_unbounded()
            && self.min_school_rating.is_unbounded()
            && self.max_school_rating.is_unbounded()
    }

    /// Whether `record` satisfies every bound
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        self.min_price.admits_from_below(&record.price)
            && self.max_price.admits_from_above(&record.price)
            && self.min_bedrooms.admits_from_below(&record.bedrooms)
            && self.max_bedrooms.admits_from_above(&record.bedrooms)
            && self.min_school_rating.admits_from_below(&record.school_rating)
            && self.max_school_rating.admits_from_above(&record.school_rating)
    }
}
