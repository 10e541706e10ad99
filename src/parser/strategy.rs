use crate::model::Category;

/// Tunable surface of the structuring engine: noise filtering, clause
/// boundary thresholds, the page heuristic and the keyword tables driving
/// enrichment. One engine, parametrized; the default value is the UBBL 1984
/// profile.
#[derive(Debug, Clone)]
pub struct ClassificationStrategy {
    /// Lines shorter than this are noise outright.
    pub min_line_len: usize,
    /// Text after a numeric prefix must exceed this length to open a clause.
    pub boundary_min_rest_len: usize,
    /// A numeric-prefixed line with at most this much trailing text, directly
    /// after another numeric-prefixed line, is a list sub-item.
    pub sub_item_max_rest_len: usize,
    /// Same-line title hints shorter than this trigger the lookahead borrow.
    pub short_title_max_len: usize,
    /// A lookahead line must exceed this length to be adopted as the title.
    pub borrowed_title_min_len: usize,
    pub lines_per_page: usize,
    pub expected_clause_band: (usize, usize),
    pub start_banners: &'static [&'static str],
    pub noise_prefixes: &'static [&'static str],
    pub category_rules: &'static [(Category, &'static [&'static str])],
    pub critical_terms: &'static [&'static str],
    pub high_priority_terms: &'static [&'static str],
    pub calculation_terms: &'static [&'static str],
    pub exception_terms: &'static [&'static str],
    pub connective_words: &'static [&'static str],
    pub building_type_rules: &'static [(&'static str, &'static [&'static str])],
    pub default_building_types: &'static [&'static str],
    pub stop_words: &'static [&'static str],
    pub keyword_cap: usize,
}

const START_BANNERS: &[&str] = &["uniform building by-laws"];

const NOISE_PREFIXES: &[&str] = &[
    "copyright",
    "all rights reserved",
    "percetakan nasional",
    "published by",
    "laws of malaysia",
    "table of contents",
    "arrangement of by-laws",
    "contents",
    "first schedule",
    "second schedule",
    "third schedule",
    "fourth schedule",
    "fifth schedule",
    "schedule",
    "appendix",
    "form a",
    "form b",
    "form c",
    "form d",
    "form e",
    "g.n.",
    "p.u.(a)",
];

const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::FireSafety,
        &[
            "fire",
            "flame",
            "smoke",
            "emergency",
            "evacuation",
            "sprinkler",
            "alarm",
        ],
    ),
    (
        Category::Structural,
        &[
            "structural",
            "load",
            "foundation",
            "beam",
            "column",
            "concrete",
            "steel",
        ],
    ),
    (
        Category::PlanSubmission,
        &["plan", "submission", "approval", "permit"],
    ),
    (
        Category::Accessibility,
        &["access", "disabled", "wheelchair", "ramp", "barrier"],
    ),
    (
        Category::Environmental,
        &["ventilation", "lighting", "natural", "artificial"],
    ),
    (
        Category::SpatialRequirements,
        &["space", "room", "area", "dimension", "height", "width"],
    ),
    (
        Category::Services,
        &["drainage", "water", "plumbing", "sanitary", "sewage"],
    ),
    (
        Category::ConstructionProcess,
        &["temporary", "demolition", "construction", "site"],
    ),
];

const CRITICAL_TERMS: &[&str] = &[
    "fire",
    "safety",
    "structural",
    "emergency",
    "danger",
    "critical",
];

const HIGH_PRIORITY_TERMS: &[&str] =
    &["access", "health", "ventilation", "drainage", "sanitation"];

const CALCULATION_TERMS: &[&str] = &[
    "calculate",
    "computation",
    "formula",
    "minimum",
    "maximum",
    "percentage",
    "ratio",
    "area",
    "volume",
    "height",
    "width",
    "load",
    "capacity",
    "factor",
    "coefficient",
];

const EXCEPTION_TERMS: &[&str] = &[
    "except",
    "unless",
    "provided that",
    "subject to",
    "notwithstanding",
    "however",
    "but",
    "save",
];

const CONNECTIVE_WORDS: &[&str] = &["and", "or", "if", "unless", "except", "provided", "where"];

const BUILDING_TYPE_RULES: &[(&str, &[&str])] = &[
    (
        "residential",
        &["residential", "dwelling", "house", "apartment", "flat"],
    ),
    (
        "commercial",
        &["commercial", "office", "shop", "retail", "business"],
    ),
    (
        "industrial",
        &["industrial", "factory", "warehouse", "godown"],
    ),
    (
        "institutional",
        &["institutional", "school", "hospital", "college"],
    ),
    (
        "assembly",
        &["assembly", "theatre", "cinema", "stadium", "concourse"],
    ),
];

const DEFAULT_BUILDING_TYPES: &[&str] =
    &["residential", "commercial", "industrial", "institutional"];

const STOP_WORDS: &[&str] = &[
    "shall", "with", "that", "this", "from", "have", "been", "such", "other", "than", "when",
    "where", "which", "their", "there", "these", "those", "under", "upon", "into", "will", "must",
    "each", "every", "being", "them", "they", "were", "also", "does", "case", "said", "thereof",
    "herein", "hereof", "made", "make", "within",
];

impl Default for ClassificationStrategy {
    fn default() -> Self {
        Self {
            min_line_len: 5,
            boundary_min_rest_len: 15,
            sub_item_max_rest_len: 40,
            short_title_max_len: 10,
            borrowed_title_min_len: 10,
            lines_per_page: 48,
            expected_clause_band: (200, 300),
            start_banners: START_BANNERS,
            noise_prefixes: NOISE_PREFIXES,
            category_rules: CATEGORY_RULES,
            critical_terms: CRITICAL_TERMS,
            high_priority_terms: HIGH_PRIORITY_TERMS,
            calculation_terms: CALCULATION_TERMS,
            exception_terms: EXCEPTION_TERMS,
            connective_words: CONNECTIVE_WORDS,
            building_type_rules: BUILDING_TYPE_RULES,
            default_building_types: DEFAULT_BUILDING_TYPES,
            stop_words: STOP_WORDS,
            keyword_cap: 8,
        }
    }
}
