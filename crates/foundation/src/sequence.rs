use std::cmp::Ordering;

/// Anything carrying an expedition-scoped traversal sequence.
///
/// Sequences are 1-based and possibly sparse; they are relied upon only
/// for sort order, never for indexing.
pub trait Sequenced {
    fn sequence(&self) -> u32;
}

/// Ascending comparator over sequence values.
///
/// Equal sequences compare as `Equal`, so sorting with `slice::sort_by`
/// (a stable sort) preserves the incoming order of ties.
pub fn compare_by_sequence<T: Sequenced>(a: &T, b: &T) -> Ordering {
    a.sequence().cmp(&b.sequence())
}

/// Sorts a slice into expedition travel order.
pub fn sort_by_sequence<T: Sequenced>(items: &mut [T]) {
    items.sort_by(compare_by_sequence);
}
