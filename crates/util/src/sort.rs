//! Insertion sort over the workspace comparator contract.

use crate::cmp;

/// Insertion sort for slices with natural ordering.
///
/// Generally faster than the built-in sort for small slices (typically
/// fewer than 32 elements); for anything larger the standard library's
/// `sort` is the better choice.
///
/// # Examples
///
/// ```
/// use medley_util::sort::insertion_sort;
///
/// let mut values = vec![3, 1, 4, 1, 5, 9, 2, 6];
/// insertion_sort(&mut values);
/// assert_eq!(values, vec![1, 1, 2, 3, 4, 5, 6, 9]);
/// ```
pub fn insertion_sort<T: PartialOrd>(values: &mut [T]) {
    insertion_sort_by(values, cmp::ascend);
}

/// Insertion sort with a three-way comparator.
///
/// # Examples
///
/// ```
/// use medley_util::cmp::descend;
/// use medley_util::sort::insertion_sort_by;
///
/// let mut values = vec![3, 1, 4, 1, 5];
/// insertion_sort_by(&mut values, descend);
/// assert_eq!(values, vec![5, 4, 3, 1, 1]);
/// ```
pub fn insertion_sort_by<T, C>(values: &mut [T], compare: C)
where
    C: Fn(&T, &T) -> i32,
{
    for i in 1..values.len() {
        let mut j = i;
        while j > 0 && compare(&values[j - 1], &values[j]) > 0 {
            values.swap(j - 1, j);
            j -= 1;
        }
    }
}
