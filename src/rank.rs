/// Descending ranks (1 = largest) with tie-averaging.
///
/// Tied values share the arithmetic mean of the rank positions they span:
/// two values tied for 2nd and 3rd both receive 2.5. This is the standard
/// fractional ranking used by rank-correlation statistics; it keeps a
/// constant series' rank sum identical to a strictly ordered one.
pub(crate) fn descending_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }

        // Positions start..end (0-based) hold ranks start+1..=end.
        #[allow(clippy::cast_precision_loss)]
        let shared = (start + 1 + end) as f64 / 2.0;
        for &index in &order[start..end] {
            ranks[index] = shared;
        }

        start = end;
    }

    ranks
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::descending_ranks;

    #[test]
    fn largest_gets_rank_one() {
        assert_eq!(descending_ranks(&[105.0, 102.0, 108.0]), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn strictly_increasing_reverses_positions() {
        assert_eq!(
            descending_ranks(&[1.0, 2.0, 3.0, 4.0]),
            vec![4.0, 3.0, 2.0, 1.0]
        );
    }

    #[test]
    fn ties_share_average_rank() {
        // 10 is 1st; the two 7s span ranks 2 and 3 → both 2.5; 5 is 4th
        assert_eq!(
            descending_ranks(&[7.0, 10.0, 7.0, 5.0]),
            vec![2.5, 1.0, 2.5, 4.0]
        );
    }

    #[test]
    fn all_equal_share_middle_rank() {
        // Ranks 1..=5 average to 3
        assert_eq!(descending_ranks(&[2.0; 5]), vec![3.0; 5]);
    }

    #[test]
    fn empty_input() {
        assert!(descending_ranks(&[]).is_empty());
    }
}
