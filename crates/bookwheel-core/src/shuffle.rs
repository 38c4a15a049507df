use rand::Rng;

/// In-place Fisher–Yates: walks from the last index down to 1 and swaps
/// each slot with a uniformly chosen slot in `0..=i`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
