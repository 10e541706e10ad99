use serde::{Deserialize, Serialize};

/// Top-level division of the by-laws, labeled with a Roman numeral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub ordinal: u32,
    pub roman_label: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FireSafety,
    Structural,
    PlanSubmission,
    Accessibility,
    Environmental,
    SpatialRequirements,
    Services,
    ConstructionProcess,
    General,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::FireSafety => "fire_safety",
            Category::Structural => "structural",
            Category::PlanSubmission => "plan_submission",
            Category::Accessibility => "accessibility",
            Category::Environmental => "environmental",
            Category::SpatialRequirements => "spatial_requirements",
            Category::Services => "services",
            Category::ConstructionProcess => "construction_process",
            Category::General => "general",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fire_safety" => Some(Category::FireSafety),
            "structural" => Some(Category::Structural),
            "plan_submission" => Some(Category::PlanSubmission),
            "accessibility" => Some(Category::Accessibility),
            "environmental" => Some(Category::Environmental),
            "spatial_requirements" => Some(Category::SpatialRequirements),
            "services" => Some(Category::Services),
            "construction_process" => Some(Category::ConstructionProcess),
            "general" => Some(Category::General),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Standard,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Standard => "standard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Priority::Critical),
            "high" => Some(Priority::High),
            "standard" => Some(Priority::Standard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseMetadata {
    pub keywords: Vec<String>,
    pub category: Category,
    pub complexity_level: u8,
    pub requires_calculation: bool,
    pub has_exceptions: bool,
    pub applicable_building_types: Vec<String>,
    pub priority: Priority,
}

/// A single numbered by-law, the atomic unit of the corpus.
///
/// `title_translated`, `body_translated` and `embedding` are attachment
/// points for downstream translation/embedding collaborators; the pipeline
/// never populates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub id: String,
    pub number: String,
    pub sequence: u32,
    pub part_ordinal: u32,
    pub part_label: String,
    pub part_title: String,
    pub title: String,
    pub body: String,
    pub page_estimate: u32,
    pub metadata: ClauseMetadata,
    pub title_translated: Option<String>,
    pub body_translated: Option<String>,
    pub embedding: Option<Vec<f32>>,
    pub created_at: String,
    pub updated_at: String,
}

/// The full ordered output of one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub parts: Vec<Part>,
    pub clauses: Vec<Clause>,
}

impl Corpus {
    pub fn by_number(&self, number: &str) -> Option<&Clause> {
        self.clauses
            .iter()
            .find(|clause| clause.number.eq_ignore_ascii_case(number))
    }

    pub fn by_part(&self, ordinal: u32) -> Vec<&Clause> {
        self.clauses
            .iter()
            .filter(|clause| clause.part_ordinal == ordinal)
            .collect()
    }

    pub fn by_category(&self, category: Category) -> Vec<&Clause> {
        self.clauses
            .iter()
            .filter(|clause| clause.metadata.category == category)
            .collect()
    }

    pub fn critical_only(&self) -> Vec<&Clause> {
        self.clauses
            .iter()
            .filter(|clause| clause.metadata.priority == Priority::Critical)
            .collect()
    }

    pub fn complex_only(&self) -> Vec<&Clause> {
        self.clauses
            .iter()
            .filter(|clause| clause.metadata.complexity_level >= 4)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusPaths {
    pub cache_root: String,
    pub manifest_dir: String,
    pub source_text_path: String,
    pub db_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestCounts {
    pub line_count: usize,
    pub content_line_count: usize,
    pub part_count: usize,
    pub clause_count: usize,
    pub parts_total: i64,
    pub clauses_total: i64,
    pub critical_clause_count: usize,
    pub calculation_clause_count: usize,
    pub exception_clause_count: usize,
    pub warning_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub db_schema_version: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub source_sha256: String,
    pub paths: CorpusPaths,
    pub counts: IngestCounts,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityCheck {
    pub check_id: String,
    pub name: String,
    pub result: String,
    pub detail: String,
}

#[derive(Debug, Default, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
}

#[derive(Debug, Serialize)]
pub struct CorpusQualityReport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub db_path: String,
    pub checks: Vec<QualityCheck>,
    pub summary: CheckSummary,
    pub issues: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CorpusExport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_sha256: Option<String>,
    pub part_count: usize,
    pub clause_count: usize,
    pub parts: Vec<Part>,
    pub clauses: Vec<Clause>,
}
