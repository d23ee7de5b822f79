/// Next id for a collection: one past the largest existing id, or 1 when
/// there are none. Gaps left by deletes are never reused below the maximum.
/// `None` once the largest id is `u64::MAX`.
pub fn next_id<I>(ids: I) -> Option<u64>
where
    I: IntoIterator<Item = u64>,
{
    match ids.into_iter().max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_starts_at_one() {
        assert_eq!(next_id(std::iter::empty()), Some(1));
    }

    #[test]
    fn max_plus_one_regardless_of_order() {
        assert_eq!(next_id([3, 1, 7, 2]), Some(8));
    }

    #[test]
    fn gaps_are_not_filled() {
        assert_eq!(next_id([1, 5]), Some(6));
    }

    #[test]
    fn largest_id_has_no_successor() {
        assert_eq!(next_id([2, u64::MAX]), None);
    }
}
