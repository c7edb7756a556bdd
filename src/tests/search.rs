use super::{
    combined_text, navigate, render_highlighted, search, Direction, Fragment, SearchResult,
    SNIPPET_CONTEXT,
};
use crate::section::Section;
use proptest::prelude::*;

fn sample_sections() -> Vec<Section> {
    vec![
        Section::new("a", "Setup", "Enable Sentry Mode in settings.", 2),
        Section::new("b", "Privacy", "Your data is private.", 2),
    ]
}

fn results_of(len: usize) -> Vec<SearchResult> {
    (0..len)
        .map(|i| SearchResult {
            section_id: format!("s{i}"),
            section_title: format!("Section {i}"),
            snippet: String::new(),
            index: i,
        })
        .collect()
}

#[test]
fn test_sentry_query_matches_setup_only() {
    let results = search(&sample_sections(), "sentry");

    assert_eq!(
        results,
        vec![SearchResult {
            section_id: "a".to_string(),
            section_title: "Setup".to_string(),
            snippet: "Setup. Enable Sentry Mode in settings.".to_string(),
            index: 0,
        }]
    );
}

#[test]
fn test_unmatched_query_is_empty() {
    assert!(search(&sample_sections(), "zzz").is_empty());
}

#[test]
fn test_blank_queries_match_nothing() {
    let sections = sample_sections();
    assert!(search(&sections, "").is_empty());
    assert!(search(&sections, "   ").is_empty());
    assert!(search(&sections, "\t\n").is_empty());
}

#[test]
fn test_title_matches_count() {
    let results = search(&sample_sections(), "PRIVACY");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].section_id, "b");
}

#[test]
fn test_separator_is_searchable() {
    // The ". " joining title and body is part of the searched text.
    let results = search(&sample_sections(), "setup. enable");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].section_id, "a");
}

#[test]
fn test_one_result_per_section_in_section_order() {
    let sections = vec![
        Section::new("x", "Later", "scam scam scam", 1),
        Section::new("y", "Nothing", "clean", 1),
        Section::new("z", "Scam first", "more text", 1),
    ];

    let results = search(&sections, "scam");

    let ids: Vec<&str> = results.iter().map(|r| r.section_id.as_str()).collect();
    assert_eq!(ids, vec!["x", "z"]);
    assert_eq!(results[0].index, 0);
    assert_eq!(results[1].index, 1);
}

#[test]
fn test_snippet_clipped_on_both_sides() {
    let body = format!("{}needle{}", "a".repeat(100), "b".repeat(100));
    let sections = vec![Section::new("s", "T", &body, 1)];

    let results = search(&sections, "needle");
    let snippet = &results[0].snippet;

    let expected = format!(
        "...{}needle{}...",
        "a".repeat(SNIPPET_CONTEXT),
        "b".repeat(SNIPPET_CONTEXT)
    );
    assert_eq!(snippet, &expected);
}

#[test]
fn test_snippet_clipped_on_right_only() {
    let body = format!("needle{}", "b".repeat(100));
    let sections = vec![Section::new("s", "T", &body, 1)];

    let snippet = &search(&sections, "needle")[0].snippet;

    assert!(!snippet.starts_with("..."));
    assert!(snippet.ends_with("..."));
    assert!(snippet.starts_with("T. needle"));
}

#[test]
fn test_snippet_keeps_original_case() {
    let sections = vec![Section::new("s", "Alerts", "Sentry MODE blocks calls", 1)];
    let snippet = &search(&sections, "mode")[0].snippet;
    assert!(snippet.contains("MODE"));
}

#[test]
fn test_snippet_counts_characters_not_bytes() {
    let body = format!("{}needle", "é".repeat(60));
    let sections = vec![Section::new("s", "T", &body, 1)];

    let snippet = &search(&sections, "NEEDLE")[0].snippet;

    assert_eq!(snippet, &format!("...{}needle", "é".repeat(SNIPPET_CONTEXT)));
}

#[test]
fn test_expanding_lowercase_matches_its_full_fold() {
    // `İ` lower-cases to `i` followed by U+0307 COMBINING DOT ABOVE.
    let sections = vec![Section::new("s", "İstanbul", "Travel tips.", 1)];

    let results = search(&sections, "i\u{307}stanbul");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].snippet, "İstanbul. Travel tips.");
    assert_eq!(search(&sections, "İSTANBUL").len(), 1);
}

#[test]
fn test_expanding_lowercase_keeps_snippet_window_in_original_text() {
    let body = format!("{}İstanbul{}", "a".repeat(50), "b".repeat(50));
    let sections = vec![Section::new("s", "T", &body, 1)];

    let snippet = &search(&sections, "i\u{307}stanbul")[0].snippet;

    let expected = format!(
        "...{}İstanbul{}...",
        "a".repeat(SNIPPET_CONTEXT),
        "b".repeat(SNIPPET_CONTEXT)
    );
    assert_eq!(snippet, &expected);
}

#[test]
fn test_prev_from_zero_wraps_to_last() {
    assert_eq!(navigate(&results_of(3), 0, Direction::Prev), 2);
}

#[test]
fn test_next_from_last_wraps_to_zero() {
    assert_eq!(navigate(&results_of(3), 2, Direction::Next), 0);
}

#[test]
fn test_navigate_on_empty_results_stays_at_zero() {
    assert_eq!(navigate(&[], 0, Direction::Next), 0);
    assert_eq!(navigate(&[], 0, Direction::Prev), 0);
}

#[test]
fn test_render_highlighted_splits_case_insensitively() {
    let fragments = render_highlighted("Sentry mode: SENTRY on", "sentry");

    assert_eq!(
        fragments,
        vec![
            Fragment {
                text: "Sentry".to_string(),
                is_match: true
            },
            Fragment {
                text: " mode: ".to_string(),
                is_match: false
            },
            Fragment {
                text: "SENTRY".to_string(),
                is_match: true
            },
            Fragment {
                text: " on".to_string(),
                is_match: false
            },
        ]
    );
}

#[test]
fn test_render_highlighted_empty_inputs_are_one_plain_fragment() {
    let plain = |text: &str| {
        vec![Fragment {
            text: text.to_string(),
            is_match: false,
        }]
    };
    assert_eq!(render_highlighted("some text", ""), plain("some text"));
    assert_eq!(render_highlighted("", "term"), plain(""));
}

#[test]
fn test_render_highlighted_treats_pattern_characters_literally() {
    let fragments = render_highlighted("cost is $5.00 (approx) or 5x00", "$5.00 (");

    let matched: Vec<&str> = fragments
        .iter()
        .filter(|f| f.is_match)
        .map(|f| f.text.as_str())
        .collect();
    assert_eq!(matched, vec!["$5.00 ("]);
}

#[test]
fn test_render_highlighted_marks_whole_expanding_character() {
    let fragments = render_highlighted("Visit İstanbul now", "i\u{307}stanbul");
    assert_eq!(
        fragments,
        vec![
            Fragment {
                text: "Visit ".to_string(),
                is_match: false
            },
            Fragment {
                text: "İstanbul".to_string(),
                is_match: true
            },
            Fragment {
                text: " now".to_string(),
                is_match: false
            },
        ]
    );
}

#[test]
fn test_render_highlighted_no_match_returns_whole_text() {
    let fragments = render_highlighted("nothing here", "zzz");
    assert_eq!(fragments.len(), 1);
    assert!(!fragments[0].is_match);
    assert_eq!(fragments[0].text, "nothing here");
}

fn arb_sections() -> impl Strategy<Value = Vec<Section>> {
    prop::collection::vec(("[a-zA-Z ]{0,12}", "[a-zA-Z .]{0,120}"), 0..8).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(i, (title, content))| Section::new(&format!("s{i}"), &title, &content, 1))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_search_is_exact_ordered_filter(sections in arb_sections(), query in "[a-zA-Z]{1,3}") {
        let results = search(&sections, &query);
        let needle = query.to_lowercase();

        let expected: Vec<&str> = sections
            .iter()
            .filter(|s| combined_text(s).to_lowercase().contains(&needle))
            .map(|s| s.id.as_str())
            .collect();
        let actual: Vec<&str> = results.iter().map(|r| r.section_id.as_str()).collect();

        prop_assert_eq!(actual, expected);
        for (i, result) in results.iter().enumerate() {
            prop_assert_eq!(result.index, i);
        }
    }

    #[test]
    fn prop_snippet_window_and_ellipses(sections in arb_sections(), query in "[a-zA-Z]{1,3}") {
        for result in search(&sections, &query) {
            let section = sections.iter().find(|s| s.id == result.section_id).unwrap();
            let combined = combined_text(section);
            let at = combined.to_lowercase().find(&query.to_lowercase()).unwrap();
            let start = at.saturating_sub(SNIPPET_CONTEXT);
            let end = (at + query.len() + SNIPPET_CONTEXT).min(combined.len());

            let mut expected = String::new();
            if start > 0 {
                expected.push_str("...");
            }
            expected.push_str(&combined[start..end]);
            if end < combined.len() {
                expected.push_str("...");
            }
            prop_assert_eq!(result.snippet, expected);
        }
    }

    #[test]
    fn prop_blank_query_matches_nothing(sections in arb_sections(), query in "[ \t]{0,4}") {
        prop_assert!(search(&sections, &query).is_empty());
    }

    #[test]
    fn prop_full_cycle_returns_to_start(len in 1usize..20, start in 0usize..20) {
        let results = results_of(len);
        let start = start % len;

        let mut forward = start;
        let mut backward = start;
        for _ in 0..len {
            forward = navigate(&results, forward, Direction::Next);
            backward = navigate(&results, backward, Direction::Prev);
        }
        prop_assert_eq!(forward, start);
        prop_assert_eq!(backward, start);
    }

    #[test]
    fn prop_next_then_prev_is_identity(len in 1usize..20, start in 0usize..20) {
        let results = results_of(len);
        let start = start % len;
        let next = navigate(&results, start, Direction::Next);
        prop_assert_eq!(navigate(&results, next, Direction::Prev), start);
    }

    #[test]
    fn prop_fragments_rebuild_text(text in "[a-zA-Z .]{0,60}", term in "[a-zA-Z]{1,3}") {
        let fragments = render_highlighted(&text, &term);
        let rebuilt: String = fragments.iter().map(|f| f.text.as_str()).collect();
        prop_assert_eq!(rebuilt, text);
        for fragment in fragments.iter().filter(|f| f.is_match) {
            prop_assert_eq!(fragment.text.to_lowercase(), term.to_lowercase());
        }
    }
}
