//! Proportional integer space distribution.
//!
//! Every multi-slice layout (grid columns, stacked rows, split regions)
//! funnels through [`ratio_distribute`], so the allocation is exact and
//! deterministic crate-wide: identical inputs always produce identical
//! splits.

/// Distribute `total` cells across weighted, minimum-bounded slices.
///
/// Each slice starts at its minimum; the remaining space is split
/// proportionally to `weights` by largest-remainder assignment (floor the
/// ideal share, then hand leftover cells to the slices with the largest
/// fractional remainder, ties broken by input order). The result sums to
/// exactly `total`.
///
/// If the minimums alone exceed `total`, slices are shrunk from the largest
/// down until the sum fits, never below 1.
///
/// # Panics
///
/// Panics if `weights` and `minimums` differ in length.
#[must_use]
pub fn ratio_distribute(total: usize, weights: &[u32], minimums: &[usize]) -> Vec<usize> {
    assert_eq!(
        weights.len(),
        minimums.len(),
        "one minimum per weighted slice"
    );
    if weights.is_empty() {
        return Vec::new();
    }

    let mut sizes: Vec<usize> = minimums.to_vec();
    let min_sum: usize = sizes.iter().sum();

    if min_sum > total {
        shrink_to_fit(&mut sizes, total);
        return sizes;
    }

    let weight_sum: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    let remaining = total - min_sum;
    if weight_sum == 0 || remaining == 0 {
        return sizes;
    }

    // Ideal share of the remainder, in (floor, fractional remainder) form.
    // Remainders are compared as exact integer fractions: share = r*w/W has
    // remainder (r*w) mod W, all over the same denominator.
    let mut assigned = 0usize;
    let mut remainders: Vec<(u64, usize)> = Vec::with_capacity(weights.len());
    for (idx, &w) in weights.iter().enumerate() {
        let numerator = remaining as u64 * u64::from(w);
        let share = (numerator / weight_sum) as usize;
        sizes[idx] += share;
        assigned += share;
        remainders.push((numerator % weight_sum, idx));
    }

    // Largest remainder first; ties stay in input order (stable sort).
    remainders.sort_by(|a, b| b.0.cmp(&a.0));
    let mut leftover = remaining - assigned;
    for &(_, idx) in &remainders {
        if leftover == 0 {
            break;
        }
        sizes[idx] += 1;
        leftover -= 1;
    }

    sizes
}

/// Shrink slices from the largest down until their sum fits in `total`,
/// never reducing a slice below 1.
fn shrink_to_fit(sizes: &mut [usize], total: usize) {
    let mut sum: usize = sizes.iter().sum();
    while sum > total {
        // Largest slice still above 1; first occurrence wins for
        // determinism.
        let Some((idx, _)) = sizes
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s > 1)
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        else {
            break;
        };
        sizes[idx] -= 1;
        sum -= 1;
    }
}
