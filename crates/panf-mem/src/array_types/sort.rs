use core::cmp::Ordering;

/// In-place quicksort partitioning around the middle element. Not stable.
///
/// `cmp` may fail; the first failure aborts the sort and is returned, leaving
/// `items` partially reordered.
pub(super) fn quick_sort<T, E, F>(items: &mut [T], mut cmp: F) -> Result<(), E>
    where
        F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    if items.len() > 1 {
        sort_range(items, 0, items.len() - 1, &mut cmp)?;
    }
    Ok(())
}

/// Sorts `items[left_border..=right_border]`. Recurses into the smaller
/// partition and loops over the larger one, so the stack stays O(log n) deep.
fn sort_range<T, E, F>(
    items: &mut [T],
    mut left_border: usize,
    mut right_border: usize,
    cmp: &mut F,
) -> Result<(), E>
    where
        F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    while left_border < right_border {
        let (left, right) = partition(items, left_border, right_border, cmp)?;
        if right.saturating_sub(left_border) < right_border.saturating_sub(left) {
            if left_border < right {
                sort_range(items, left_border, right, cmp)?;
            }
            left_border = left;
        }
        else {
            if left < right_border {
                sort_range(items, left, right_border, cmp)?;
            }
            right_border = right;
        }
    }
    Ok(())
}

/// Hoare partition. Returns the crossed cursors `(left, right)`: everything in
/// `[left_border, right]` is not greater than the pivot and everything in
/// `[left, right_border]` is not less.
///
/// `right` saturates at zero instead of stepping below it; callers only test
/// it with `left_border < right`, which stays false in that case.
fn partition<T, E, F>(
    items: &mut [T],
    left_border: usize,
    right_border: usize,
    cmp: &mut F,
) -> Result<(usize, usize), E>
    where
        F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let mut left = left_border;
    let mut right = right_border;
    // index of the pivot value, followed through swaps
    let mut pivot = left_border + (right_border - left_border) / 2;
    loop {
        while left < right_border && cmp(&items[left], &items[pivot])? == Ordering::Less {
            left += 1;
        }
        while right > left_border && cmp(&items[right], &items[pivot])? == Ordering::Greater {
            right -= 1;
        }
        if left <= right {
            if left < right {
                items.swap(left, right);
                if pivot == left {
                    pivot = right;
                }
                else if pivot == right {
                    pivot = left;
                }
            }
            left += 1;
            right = right.saturating_sub(1);
        }
        if left > right {
            return Ok((left, right))
        }
    }
}

/// Rearranges `items` so that slot `i` receives the element previously at
/// `order[i]`. `order` must be a permutation of `0..items.len()` and is left
/// as the identity.
pub(super) fn apply_permutation<T>(items: &mut [T], order: &mut [usize]) {
    debug_assert_eq!(items.len(), order.len());
    for start in 0..order.len() {
        let mut current = start;
        loop {
            let next = order[current];
            order[current] = current;
            if next == start {
                break
            }
            items.swap(current, next);
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
        let mut items = items.to_vec();
        let Ok(()) = quick_sort(&mut items, |a: &T, b: &T| Ok::<_, Infallible>(a.cmp(b)));
        items
    }

    #[test]
    fn sorts_small_inputs() {
        assert_eq!(sorted::<i32>(&[]), Vec::<i32>::new());
        assert_eq!(sorted(&[1]), [1]);
        assert_eq!(sorted(&[2, 1]), [1, 2]);
        assert_eq!(sorted(&[1, 2]), [1, 2]);
        assert_eq!(sorted(&[3, 1, 2]), [1, 2, 3]);
    }

    #[test]
    fn sorts_duplicates_and_presorted_runs() {
        assert_eq!(sorted(&[4, 4, 4, 4]), [4, 4, 4, 4]);
        assert_eq!(sorted(&[2, 1, 2, 1, 2, 1]), [1, 1, 1, 2, 2, 2]);
        assert_eq!(sorted(&[1, 2, 3, 4, 5, 6, 7]), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(sorted(&[7, 6, 5, 4, 3, 2, 1]), [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn large_descending_input_does_not_exhaust_stack() {
        let input: Vec<u32> = (0..100_000).rev().collect();
        let output = sorted(&input);
        assert!(output.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn comparison_failure_is_returned() {
        let mut items = [1, 2, 3];
        let res = quick_sort(&mut items, |_: &i32, _: &i32| Err::<Ordering, _>("no order"));
        assert_eq!(res, Err("no order"));
    }

    #[test]
    fn permutation_moves_each_element_once() {
        let mut items = ['a', 'b', 'c', 'd', 'e'];
        let mut order = [3, 0, 4, 1, 2];
        apply_permutation(&mut items, &mut order);
        assert_eq!(items, ['d', 'a', 'e', 'b', 'c']);
        assert_eq!(order, [0, 1, 2, 3, 4]);
    }
}
