use super::*;
use crate::model::{Category, Clause, ClauseMetadata, Part, Priority};

fn classifier() -> LineClassifier {
    LineClassifier::new(ClassificationStrategy::default()).expect("classifier should compile")
}

fn enricher() -> MetadataEnricher {
    MetadataEnricher::new(ClassificationStrategy::default())
}

fn parse(text: &str) -> ParsedDocument {
    parse_document(text, &classifier())
}

fn synthetic_text(clause_count: usize) -> String {
    let mut text = String::from("UNIFORM BUILDING BY-LAWS 1984\nPART I - PRELIMINARY\n");
    for number in 1..=clause_count {
        text.push_str(&format!(
            "{number}. Requirement heading number {number} in full\n"
        ));
        text.push_str(&format!(
            "The works described under item {number} shall comply with the approved drawings and specifications.\n"
        ));
    }
    text
}

fn make_clause(number: &str, sequence: u32, part_ordinal: u32) -> Clause {
    Clause {
        id: format!("bylaw-{number}"),
        number: number.to_string(),
        sequence,
        part_ordinal,
        part_label: "I".to_string(),
        part_title: "PRELIMINARY".to_string(),
        title: "Heading".to_string(),
        body: "Content of the provision.".to_string(),
        page_estimate: 1,
        metadata: ClauseMetadata {
            keywords: Vec::new(),
            category: Category::General,
            complexity_level: 1,
            requires_calculation: false,
            has_exceptions: false,
            applicable_building_types: vec!["residential".to_string()],
            priority: Priority::Standard,
        },
        title_translated: None,
        body_translated: None,
        embedding: None,
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

#[test]
fn roman_decodes_canonical_numerals() {
    assert_eq!(roman_to_int("I"), Some(1));
    assert_eq!(roman_to_int("IV"), Some(4));
    assert_eq!(roman_to_int("IX"), Some(9));
    assert_eq!(roman_to_int("XL"), Some(40));
    assert_eq!(roman_to_int("XLIX"), Some(49));
    assert_eq!(roman_to_int("L"), Some(50));
    assert_eq!(roman_to_int("MCMXCIV"), Some(1994));
}

#[test]
fn roman_decode_is_case_insensitive_and_rejects_unknown_symbols() {
    assert_eq!(roman_to_int("xiv"), Some(14));
    assert_eq!(roman_to_int("ABC"), None);
    assert_eq!(roman_to_int(""), None);
}

#[test]
fn roman_round_trips_one_through_fifty() {
    for value in 1..=50 {
        assert_eq!(roman_to_int(&int_to_roman(value)), Some(value));
    }
}

#[test]
fn classify_page_markers_and_boilerplate_as_noise() {
    let classifier = classifier();

    assert_eq!(classifier.classify("Page 5", None), LineClass::Noise);
    assert_eq!(classifier.classify("1234.", None), LineClass::Noise);
    assert_eq!(classifier.classify(".....", None), LineClass::Noise);
    assert_eq!(classifier.classify("ab", None), LineClass::Noise);
    assert_eq!(
        classifier.classify("ARRANGEMENT OF BY-LAWS", None),
        LineClass::Noise
    );
    assert_eq!(
        classifier.classify("Fourth Schedule (By-law 34)", None),
        LineClass::Noise
    );
}

#[test]
fn classify_recognizes_part_headers() {
    let classifier = classifier();

    assert_eq!(
        classifier.classify("PART IV - FIRE SAFETY", None),
        LineClass::PartHeader {
            roman: "IV".to_string(),
            title_hint: Some("FIRE SAFETY".to_string()),
        }
    );
    assert_eq!(
        classifier.classify("Part II", None),
        LineClass::PartHeader {
            roman: "II".to_string(),
            title_hint: None,
        }
    );
}

#[test]
fn classify_recognizes_clause_starts() {
    let classifier = classifier();

    assert_eq!(
        classifier.classify(
            "12A. Every building shall have adequate means of escape",
            None
        ),
        LineClass::ClauseStart {
            number: "12A".to_string(),
            title_hint: "Every building shall have adequate means of escape".to_string(),
        }
    );
    assert_eq!(
        classifier.classify("1. Short title", Some("PART I - PRELIMINARY")),
        LineClass::ClauseStart {
            number: "1".to_string(),
            title_hint: "Short title".to_string(),
        }
    );
}

#[test]
fn classify_without_numeric_prefix_is_continuation() {
    assert_eq!(
        classifier().classify("the occupier shall", None),
        LineClass::Continuation
    );
}

#[test]
fn boundary_predicate_rejects_short_sub_items_after_numeric_lines() {
    let classifier = classifier();
    let previous = Some("5. The following materials shall be approved for use");

    assert_eq!(
        classifier.classify("6. timber products and steel", previous),
        LineClass::Continuation
    );
    assert_eq!(
        classifier.classify("6. timber products and steel", None),
        LineClass::ClauseStart {
            number: "6".to_string(),
            title_hint: "timber products and steel".to_string(),
        }
    );
}

#[test]
fn end_to_end_scenario_produces_two_clauses_under_part_one() {
    let text = [
        "PART I - PRELIMINARY",
        "1. Short title",
        "This by-law may be cited as the Uniform Building By-laws.",
        "2. Application",
        "This by-law applies to all buildings within the jurisdiction.",
    ]
    .join("\n");

    let parsed = parse(&text);

    assert_eq!(parsed.parts.len(), 1);
    assert_eq!(parsed.parts[0].ordinal, 1);
    assert_eq!(parsed.parts[0].title, "PRELIMINARY");

    assert_eq!(parsed.clauses.len(), 2);
    assert!(parsed.warnings.is_empty());

    let first = &parsed.clauses[0];
    assert_eq!(first.id, "bylaw-1");
    assert_eq!(first.title, "Short title");
    assert_eq!(first.sequence, 1);
    assert_eq!(first.part_ordinal, 1);
    assert!(!first.body.contains("Short title"));
    assert!(first.body.contains("may be cited"));

    let second = &parsed.clauses[1];
    assert_eq!(second.title, "Application");
    assert_eq!(second.sequence, 2);
    assert!(!second.body.contains("Application"));
}

#[test]
fn part_header_mid_clause_finalizes_before_opening_the_part() {
    let text = [
        "PART I - PRELIMINARY",
        "1. Interpretation of terms used in these by-laws",
        "In these by-laws unless the context otherwise requires terms carry their defined meanings.",
        "PART II - SUBMISSION OF PLANS FOR APPROVAL",
        "2. Submission of plans for the approval of the local authority",
        "All plans shall be submitted to the local authority for approval before work begins.",
    ]
    .join("\n");

    let parsed = parse(&text);

    assert_eq!(parsed.parts.len(), 2);
    assert_eq!(parsed.clauses.len(), 2);
    assert_eq!(parsed.clauses[0].part_ordinal, 1);
    assert_eq!(parsed.clauses[1].part_ordinal, 2);
    assert_eq!(parsed.clauses[1].part_title, "SUBMISSION OF PLANS FOR APPROVAL");
    assert_eq!(parsed.clauses[0].sequence, 1);
    assert_eq!(parsed.clauses[1].sequence, 2);
}

#[test]
fn short_title_hint_borrows_the_next_line() {
    let text = [
        "PART I - PRELIMINARY",
        "29. Protected",
        "shafts and protected lobbies generally",
        "Every protected shaft shall be enclosed with fire resisting construction.",
    ]
    .join("\n");

    let parsed = parse(&text);

    assert_eq!(parsed.clauses.len(), 1);
    let clause = &parsed.clauses[0];
    assert_eq!(clause.title, "shafts and protected lobbies generally");
    assert_eq!(
        clause.body,
        "Every protected shaft shall be enclosed with fire resisting construction."
    );
}

#[test]
fn part_header_without_inline_title_borrows_the_next_line() {
    let text = [
        "PART II",
        "SUBMISSION OF PLANS",
        "2. Submission of plans for the approval of the local authority",
        "All plans shall be submitted before any building operations commence.",
    ]
    .join("\n");

    let parsed = parse(&text);

    assert_eq!(parsed.parts.len(), 1);
    assert_eq!(parsed.parts[0].title, "SUBMISSION OF PLANS");
    assert_eq!(parsed.clauses.len(), 1);
}

#[test]
fn clause_before_any_part_is_skipped_with_a_warning() {
    let text = [
        "UNIFORM BUILDING BY-LAWS 1984",
        "3. Approval of plans required for all building operations",
        "No building operations shall commence without prior approval of plans.",
    ]
    .join("\n");

    let parsed = parse(&text);

    assert!(parsed.clauses.is_empty());
    assert!(
        parsed
            .warnings
            .iter()
            .any(|warning| warning.contains("no active part"))
    );
}

#[test]
fn lines_before_the_start_marker_are_discarded() {
    let text = [
        "Some publisher front matter of reasonable length",
        "This preface text should never become clause content.",
        "PART I - PRELIMINARY",
        "1. Short title and application of these by-laws",
        "These by-laws apply throughout the jurisdiction.",
    ]
    .join("\n");

    let parsed = parse(&text);

    assert_eq!(parsed.clauses.len(), 1);
    assert!(!parsed.clauses[0].body.contains("preface"));
}

#[test]
fn accumulator_strips_duplicated_title_prefix_from_body() {
    let part = Part {
        ordinal: 1,
        roman_label: "I".to_string(),
        title: "PRELIMINARY".to_string(),
    };

    let mut accumulator =
        ClauseAccumulator::new("12".to_string(), "Means of escape".to_string(), 0);
    accumulator.push_fragment("Means of escape shall be provided");
    accumulator.push_fragment("in every building");

    let draft = accumulator.finalize(&part, 1, 48);

    assert_eq!(draft.body, "shall be provided in every building");
    assert_eq!(draft.page_estimate, 1);
    assert_eq!(draft.id, "bylaw-12");
}

#[test]
fn band_warning_fires_for_small_corpora_without_aborting() {
    let outcome = run_pipeline(
        &synthetic_text(50),
        ClassificationStrategy::default(),
        "2026-01-01T00:00:00Z",
    )
    .expect("pipeline should run");

    assert_eq!(outcome.corpus.clauses.len(), 50);
    assert!(
        outcome
            .warnings
            .iter()
            .any(|warning| warning.contains("outside expected band"))
    );
}

#[test]
fn sequences_are_gap_free_from_one() {
    let outcome = run_pipeline(
        &synthetic_text(50),
        ClassificationStrategy::default(),
        "2026-01-01T00:00:00Z",
    )
    .expect("pipeline should run");

    for (index, clause) in outcome.corpus.clauses.iter().enumerate() {
        assert_eq!(clause.sequence, index as u32 + 1);
    }
}

#[test]
fn pipeline_is_deterministic_for_a_pinned_timestamp() {
    let text = synthetic_text(250);
    let first = run_pipeline(
        &text,
        ClassificationStrategy::default(),
        "2026-01-01T00:00:00Z",
    )
    .expect("first run");
    let second = run_pipeline(
        &text,
        ClassificationStrategy::default(),
        "2026-01-01T00:00:00Z",
    )
    .expect("second run");

    assert!(first.warnings.is_empty());
    let first_json = serde_json::to_string(&first.corpus).expect("serialize first");
    let second_json = serde_json::to_string(&second.corpus).expect("serialize second");
    assert_eq!(first_json, second_json);
}

#[test]
fn enrich_category_uses_first_matching_rule() {
    let enricher = enricher();

    let fire = enricher.enrich("", "fire resistance of structural concrete elements");
    assert_eq!(fire.category, Category::FireSafety);

    let plans = enricher.enrich("", "submission of plans for approval");
    assert_eq!(plans.category, Category::PlanSubmission);

    let spatial = enricher.enrich("", "every habitable room in the premises");
    assert_eq!(spatial.category, Category::SpatialRequirements);

    let general = enricher.enrich("", "general conduct of occupiers");
    assert_eq!(general.category, Category::General);
}

#[test]
fn enrich_detects_calculation_and_exception_terms() {
    let enricher = enricher();

    let metadata = enricher.enrich(
        "",
        "the minimum clear height of a room provided that the local authority may allow otherwise",
    );

    assert!(metadata.requires_calculation);
    assert!(metadata.has_exceptions);
}

#[test]
fn enrich_complexity_levels_follow_the_ladder() {
    let enricher = enricher();

    let simple = enricher.enrich("Short title", "This by-law may be cited");
    assert_eq!(simple.complexity_level, 1);

    let moderate = enricher.enrich(
        "",
        &"the builder shall keep the premises clean and tidy at all times ".repeat(3),
    );
    assert_eq!(moderate.complexity_level, 2);

    let dense = enricher.enrich(
        "",
        &"minimum area and volume except where the height and width and load and capacity apply "
            .repeat(15),
    );
    assert_eq!(dense.complexity_level, 5);
}

#[test]
fn enrich_priority_tiers() {
    let enricher = enricher();

    assert_eq!(
        enricher.enrich("", "fire appliance access").priority,
        Priority::Critical
    );
    assert_eq!(
        enricher.enrich("", "drainage pipes and gutters").priority,
        Priority::High
    );
    assert_eq!(
        enricher.enrich("", "notices to the occupier").priority,
        Priority::Standard
    );
}

#[test]
fn enrich_building_types_default_to_the_broad_set() {
    let enricher = enricher();

    let matched = enricher.enrich("", "every factory and godown");
    assert_eq!(matched.applicable_building_types, vec!["industrial"]);

    let unmatched = enricher.enrich("", "notices to the occupier");
    assert_eq!(
        unmatched.applicable_building_types,
        vec!["residential", "commercial", "industrial", "institutional"]
    );
}

#[test]
fn enrich_keywords_are_deduplicated_filtered_and_capped() {
    let enricher = enricher();

    let metadata = enricher.enrich(
        "Means of escape",
        "every building shall have adequate means of escape provided",
    );
    assert_eq!(
        metadata.keywords,
        vec!["means", "escape", "building", "adequate", "provided"]
    );

    let capped = enricher.enrich(
        "",
        "staircase corridor balustrade parapet chimney basement verandah awning canopy terrace",
    );
    assert_eq!(capped.keywords.len(), 8);
}

#[test]
fn corpus_warnings_flag_band_and_ownership_violations() {
    let strategy = ClassificationStrategy::default();
    let parts = vec![Part {
        ordinal: 1,
        roman_label: "I".to_string(),
        title: "PRELIMINARY".to_string(),
    }];
    let clauses = vec![make_clause("1", 1, 1), make_clause("2", 2, 9)];

    let warnings = corpus_warnings(&strategy, &parts, &clauses);

    assert!(
        warnings
            .iter()
            .any(|warning| warning.contains("outside expected band"))
    );
    assert!(
        warnings
            .iter()
            .any(|warning| warning.contains("unobserved part ordinal 9"))
    );
}

#[test]
fn corpus_warnings_flag_sequence_breaks_and_title_duplication() {
    let strategy = ClassificationStrategy::default();
    let parts = vec![Part {
        ordinal: 1,
        roman_label: "I".to_string(),
        title: "PRELIMINARY".to_string(),
    }];

    let mut broken = make_clause("1", 3, 1);
    broken.title = "Heading".to_string();
    broken.body = "Heading repeated into the body text.".to_string();

    let warnings = corpus_warnings(&strategy, &parts, &[broken]);

    assert!(
        warnings
            .iter()
            .any(|warning| warning.contains("out-of-order sequence"))
    );
    assert!(
        warnings
            .iter()
            .any(|warning| warning.contains("begins with its own title"))
    );
}

#[test]
fn cursor_peek_does_not_consume() {
    let lines = content_lines("first line of text\nsecond line of text\n");
    let mut cursor = LineCursor::new(&lines);

    assert_eq!(cursor.peek().map(|line| line.index), Some(0));
    assert_eq!(cursor.next_line().map(|line| line.index), Some(0));
    assert_eq!(cursor.peek().map(|line| line.index), Some(1));
    cursor.advance();
    assert!(cursor.next_line().is_none());
}

#[test]
fn content_lines_trim_and_drop_blanks_but_keep_source_indexes() {
    let lines = content_lines("  first  \n\n\n  fourth  \n");

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "first");
    assert_eq!(lines[0].index, 0);
    assert_eq!(lines[1].text, "fourth");
    assert_eq!(lines[1].index, 3);
}
