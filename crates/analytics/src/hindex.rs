//! H-index

/// Largest `h` such that `h` of the given publications have at least `h`
/// citations each.
pub fn h_index(citations: &[u32]) -> u32 {
    let mut sorted = citations.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
        .iter()
        .enumerate()
        .take_while(|&(i, &c)| c as usize > i)
        .count() as u32
}
