use pretty_assertions::assert_eq;
use selection_engine::{LineSequence, SortPolicy, sort_lines};

fn ordinal(case_sensitive: bool) -> SortPolicy {
    SortPolicy {
        case_sensitive,
        ordinal_comparison: true,
        ..SortPolicy::default()
    }
}

fn sort_text(text: &str, policy: &SortPolicy) -> String {
    sort_lines(&LineSequence::parse(text), policy).serialize()
}

fn all_policies() -> Vec<SortPolicy> {
    let mut policies = Vec::new();
    for bits in 0..64u8 {
        policies.push(SortPolicy {
            case_sensitive: bits & 1 != 0,
            ordinal_comparison: bits & 2 != 0,
            ascending: bits & 4 != 0,
            ignore_leading_whitespace: bits & 8 != 0,
            ignore_punctuation: bits & 16 != 0,
            eliminate_duplicates: bits & 32 != 0,
        });
    }
    policies
}

#[test]
fn test_scenario_ordinal_ascending() {
    assert_eq!(sort_text("b\na\nc\n", &ordinal(true)), "a\nb\nc\n");
}

#[test]
fn test_scenario_case_insensitive_duplicates() {
    let policy = SortPolicy {
        eliminate_duplicates: true,
        ..ordinal(false)
    };
    assert_eq!(sort_text("B\nb\na\n", &policy), "a\nB\n");
}

#[test]
fn test_scenario_mixed_terminators_descending() {
    let policy = SortPolicy {
        ascending: false,
        ..ordinal(true)
    };
    // `c` had no terminator; it trades with the line that now ends the block.
    assert_eq!(sort_text("a\r\nb\nc", &policy), "c\r\nb\na");
    // With a closed end every terminator stays on its own line.
    assert_eq!(sort_text("a\r\nb\nc\r", &policy), "c\rb\na\r\n");
}

#[test]
fn test_stability_in_both_directions() {
    let text = "x 2\nA\nx 1\na\n";
    let ascending = SortPolicy {
        ignore_punctuation: true,
        ..ordinal(false)
    };
    // "A" and "a" share a key and keep their input order.
    assert_eq!(sort_text(text, &ascending), "A\na\nx 1\nx 2\n");

    let descending = SortPolicy {
        ascending: false,
        ..ascending
    };
    assert_eq!(sort_text(text, &descending), "x 2\nx 1\nA\na\n");
}

#[test]
fn test_duplicates_keep_first_occurrence_terminator() {
    let policy = SortPolicy {
        eliminate_duplicates: true,
        ..ordinal(true)
    };
    assert_eq!(sort_text("b\r\na\nb\nc\r\n", &policy), "a\nb\r\nc\r\n");
}

#[test]
fn test_case_insensitive_duplicates_fold_one_char_at_a_time() {
    let policy = SortPolicy {
        eliminate_duplicates: true,
        ..ordinal(false)
    };
    assert_eq!(sort_text("ss\n\u{df}\nSS\n", &policy), "ss\n\u{df}\n");
}

#[test]
fn test_duplicates_with_unterminated_last_line() {
    let policy = SortPolicy {
        eliminate_duplicates: true,
        ..ordinal(true)
    };
    assert_eq!(sort_text("a\nb\na", &policy), "a\nb");
}

#[test]
fn test_culture_order() {
    let policy = SortPolicy::default();
    assert_eq!(
        sort_text("cherry\nBanana\napple\n_private\n10\n", &policy),
        "_private\n10\napple\nBanana\ncherry\n"
    );
    assert_eq!(sort_text("b\nB\na\nA\n", &ordinal(true)), "A\nB\na\nb\n");
    let culture_cs = SortPolicy {
        case_sensitive: true,
        ..SortPolicy::default()
    };
    assert_eq!(sort_text("b\nB\na\nA\n", &culture_cs), "a\nA\nb\nB\n");
}

#[test]
fn test_content_is_never_altered() {
    let policy = SortPolicy {
        ignore_leading_whitespace: true,
        ignore_punctuation: true,
        ..SortPolicy::default()
    };
    assert_eq!(
        sort_text("  --zeta\n\t(alpha)\n", &policy),
        "\t(alpha)\n  --zeta\n"
    );
}

#[test]
fn test_sort_is_idempotent_for_every_policy() {
    let text = "pear\n  Apple\napple\n-banana\nBanana\n\n10\n9\npear";
    for policy in all_policies() {
        let once = sort_text(text, &policy);
        let twice = sort_text(&once, &policy);
        assert_eq!(once, twice, "{policy:?}");
    }
}

#[test]
fn test_output_length_matches_distinct_keys() {
    let text = "b\nB\na\nc\nA\nb\n";
    for policy in all_policies() {
        let seq = LineSequence::parse(text);
        let sorted = sort_lines(&seq, &policy);
        let comparer = policy.comparer();

        let mut distinct: Vec<String> = Vec::new();
        for line in seq.lines() {
            let key = policy.sort_key(&line.content);
            if !distinct.iter().any(|k| comparer.equals(k, &key)) {
                distinct.push(key.into_owned());
            }
        }

        let expected = if policy.eliminate_duplicates {
            distinct.len()
        } else {
            seq.len()
        };
        assert_eq!(sorted.len(), expected, "{policy:?}");
    }
}

quickcheck::quickcheck! {
    fn prop_sort_is_a_permutation(lines: Vec<String>) -> bool {
        let text: String = lines
            .iter()
            .map(|l| l.replace(['\r', '\n'], ""))
            .map(|l| format!("{l}\n"))
            .collect();
        let seq = LineSequence::parse(&text);
        let sorted = sort_lines(&seq, &SortPolicy::default());

        let mut before: Vec<_> = seq.lines().to_vec();
        let mut after: Vec<_> = sorted.lines().to_vec();
        before.sort_by(|a, b| a.content.cmp(&b.content));
        after.sort_by(|a, b| a.content.cmp(&b.content));
        before == after
    }
}
