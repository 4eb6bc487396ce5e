use crate::model::{normalize_for_search, SearchRecord};

pub fn search(records: &[SearchRecord], query: &str, limit: usize) -> Vec<SearchRecord> {
    if limit == 0 || records.is_empty() {
        return Vec::new();
    }

    let normalized_query = normalize_for_search(query);
    if normalized_query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(i64, usize, &SearchRecord)> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            score_filter(record.normalized_filter(), &normalized_query)
                .map(|score| (score, index, record))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, _, record)| record.clone())
        .collect()
}

fn score_filter(normalized_filter: &str, query: &str) -> Option<i64> {
    if normalized_filter.is_empty() || query.is_empty() {
        return None;
    }

    if let Some(position) = normalized_filter.find(query) {
        let prefix_bonus = if position == 0 { 400 } else { 0 };
        let compact_bonus = (query.len() as i64) * 40;
        let position_penalty = position as i64;
        return Some(10_000 + prefix_bonus + compact_bonus - position_penalty);
    }

    let positions = subsequence_positions(normalized_filter, query)?;
    let start_penalty = positions[0] as i64;
    let gap_penalty: i64 = positions
        .windows(2)
        .map(|pair| pair[1].saturating_sub(pair[0] + 1) as i64)
        .sum();

    Some(5_000 + (query.len() as i64) * 30 - gap_penalty * 6 - start_penalty)
}

fn subsequence_positions(haystack: &str, needle: &str) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(needle.len());
    let mut next_start = 0;

    for needle_char in needle.chars() {
        let mut found = None;
        for (offset, hay_char) in haystack[next_start..].char_indices() {
            if hay_char == needle_char {
                let absolute = next_start + offset;
                found = Some(absolute);
                next_start = absolute + hay_char.len_utf8();
                break;
            }
        }

        let position = found?;
        positions.push(position);
    }

    Some(positions)
}
