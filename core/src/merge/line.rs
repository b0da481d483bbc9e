/// Result of sliding one line towards index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSlide {
    pub values: Vec<u32>,
    pub merged: Vec<bool>,
    pub score: u32,
}

/// Compacts `line` towards index 0, merging each value with its right-hand
/// neighbour when equal. A merged pair never merges again in the same pass,
/// so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]` and `[2, 2, 4, 0]` becomes
/// `[4, 4, 0, 0]`.
pub fn slide_line(line: &[u32]) -> LineSlide {
    let mut compacted: Vec<u32> = line.iter().copied().filter(|&value| value != 0).collect();
    let mut merged_at = vec![false; compacted.len()];
    let mut score = 0;

    let mut index = 0;
    while index + 1 < compacted.len() {
        if compacted[index] == compacted[index + 1] {
            compacted[index] *= 2;
            compacted[index + 1] = 0;
            merged_at[index] = true;
            score += compacted[index];
            index += 2;
        } else {
            index += 1;
        }
    }

    let mut values = Vec::with_capacity(line.len());
    let mut merged = Vec::with_capacity(line.len());
    for (value, was_merged) in compacted.into_iter().zip(merged_at) {
        if value != 0 {
            values.push(value);
            merged.push(was_merged);
        }
    }
    values.resize(line.len(), 0);
    merged.resize(line.len(), false);

    LineSlide {
        values,
        merged,
        score,
    }
}
