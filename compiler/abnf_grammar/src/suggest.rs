//! "Did you mean?" suggestions for undefined rule names.
//!
//! Rule names compare case-insensitively, so distances are measured on the
//! lowercased names. The threshold grows with the length of the name.

/// Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    // two rows instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

fn threshold(name_len: usize) -> usize {
    match name_len {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        n => (n / 2).min(5),
    }
}

/// The defined name closest to `name`, if any is close enough.
pub(crate) fn suggest_rule<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let wanted = name.to_ascii_lowercase();
    let limit = threshold(wanted.len());
    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        if wanted.len().abs_diff(candidate.len()) > limit {
            continue;
        }
        let distance = edit_distance(&wanted, &candidate.to_ascii_lowercase());
        if distance == 0 || distance > limit {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(edit_distance("digit", "digit"), 0);
        assert_eq!(edit_distance("digt", "digit"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn suggests_closest_name() {
        let names = ["dateValue", "timeOfDayValue", "DIGIT"];
        assert_eq!(suggest_rule("datevalu", names), Some("dateValue"));
        assert_eq!(suggest_rule("DIGT", names), Some("DIGIT"));
        assert_eq!(suggest_rule("guidValue", names), None);
    }
}
