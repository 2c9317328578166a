use thiserror::Error;

use crate::entity::RawEntity;

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Recognition failed: {0}")]
    Failed(String),
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
}

pub type RecognitionResult<T> = Result<T, RecognitionError>;

/// The external recognition capability behind a swappable seam.
///
/// Implementations locate and classify entity spans in text. They are shared
/// read-only across requests, so a recognizer that mutates internal state per
/// call must do its own locking.
#[async_trait::async_trait]
pub trait Recognizer: Send + Sync {
    /// Provenance tag stamped on entities this recognizer produces.
    fn name(&self) -> &str;

    async fn recognize(&self, text: &str) -> RecognitionResult<Vec<RawEntity>>;
}

pub struct RecognitionPattern {
    pub entity_type: String,
    pub regex: regex::Regex,
    pub confidence: f64,
}

impl RecognitionPattern {
    pub fn new(
        entity_type: impl Into<String>,
        pattern: &str,
        confidence: f64,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            entity_type: entity_type.into(),
            regex: regex::Regex::new(pattern)?,
            confidence,
        })
    }
}

/// Regex-driven recognizer over a named set of patterns.
pub struct RuleBasedRecognizer {
    name: String,
    patterns: Vec<RecognitionPattern>,
}

const PRACTICE_AREAS: &[&str] = &[
    "intellectual property",
    "patent law",
    "copyright infringement",
    "copyright law",
    "trademark disputes",
    "trademark law",
    "trade secret litigation",
    "software licensing",
    "open source compliance",
    "corporate law",
    "criminal defense",
    "family law",
    "employment law",
    "personal injury",
    "real estate law",
    "immigration law",
    "tax law",
    "bankruptcy",
    "securities litigation",
    "antitrust",
];

const JURISDICTIONS: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "District of Columbia",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "United States",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

const PARTY_ROLES: &[&str] = &[
    "plaintiff",
    "defendant",
    "appellant",
    "appellee",
    "petitioner",
    "respondent",
    "attorney",
    "lawyer",
    "counsel",
    "paralegal",
    "judge",
    "juror",
    "witness",
];

/// Joins phrases into a word-bounded alternation, longest first so that
/// e.g. "West Virginia" wins over "Virginia" and "copyright infringement"
/// over "copyright law"'s shared prefix.
fn alternation(phrases: &[&str], case_insensitive: bool, plural: bool) -> String {
    let mut sorted: Vec<&str> = phrases.to_vec();
    sorted.sort_by_key(|p| std::cmp::Reverse(p.len()));

    let flags = if case_insensitive { "(?i)" } else { "" };
    let suffix = if plural { "s?" } else { "" };
    format!(r"{flags}\b(?:{}){suffix}\b", sorted.join("|"))
}

impl RuleBasedRecognizer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patterns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: RecognitionPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Legal practice areas ("patent law", "trademark disputes", ...).
    #[must_use]
    pub fn practice_areas() -> Self {
        let mut recognizer = Self::new("practice_area_rules");
        let pattern = RecognitionPattern::new(
            "practice_area",
            &alternation(PRACTICE_AREAS, true, false),
            0.85,
        );
        if let Ok(p) = pattern {
            recognizer.patterns.push(p);
        }
        recognizer
    }

    /// US state and federal jurisdiction names. Case-sensitive so that
    /// "washington" in running prose does not count as the state.
    #[must_use]
    pub fn jurisdictions() -> Self {
        let mut recognizer = Self::new("jurisdiction_rules");
        let pattern = RecognitionPattern::new(
            "jurisdiction",
            &alternation(JURISDICTIONS, false, false),
            0.9,
        );
        if let Ok(p) = pattern {
            recognizer.patterns.push(p);
        }
        recognizer
    }

    /// Litigation party roles ("plaintiff", "defendant", "counsel", ...).
    #[must_use]
    pub fn party_roles() -> Self {
        let mut recognizer = Self::new("party_role_rules");
        let pattern = RecognitionPattern::new(
            "party_role",
            &alternation(PARTY_ROLES, true, true),
            0.75,
        );
        if let Ok(p) = pattern {
            recognizer.patterns.push(p);
        }
        recognizer
    }
}

#[async_trait::async_trait]
impl Recognizer for RuleBasedRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn recognize(&self, text: &str) -> RecognitionResult<Vec<RawEntity>> {
        let mut entities = Vec::new();

        for pattern in &self.patterns {
            for capture in pattern.regex.find_iter(text) {
                let entity =
                    RawEntity::new(capture.as_str().to_string(), capture.start(), capture.end())
                        .with_type(pattern.entity_type.clone())
                        .with_confidence(pattern.confidence)
                        .with_source(self.name.clone());
                entities.push(entity);
            }
        }

        Ok(entities)
    }
}

/// Runs several sub-recognizers over the same text and concatenates their
/// output, ordered by span position.
pub struct CompositeRecognizer {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl CompositeRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            recognizers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_recognizer(mut self, recognizer: Box<dyn Recognizer>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    /// The default production recognizer: practice areas, jurisdictions,
    /// and party roles.
    #[must_use]
    pub fn legal() -> Self {
        Self::new()
            .with_recognizer(Box::new(RuleBasedRecognizer::practice_areas()))
            .with_recognizer(Box::new(RuleBasedRecognizer::jurisdictions()))
            .with_recognizer(Box::new(RuleBasedRecognizer::party_roles()))
    }
}

impl Default for CompositeRecognizer {
    fn default() -> Self {
        Self::legal()
    }
}

#[async_trait::async_trait]
impl Recognizer for CompositeRecognizer {
    fn name(&self) -> &str {
        "composite"
    }

    async fn recognize(&self, text: &str) -> RecognitionResult<Vec<RawEntity>> {
        let mut combined = Vec::new();

        for recognizer in &self.recognizers {
            let mut entities = recognizer.recognize(text).await?;
            for entity in &mut entities {
                if entity.source.is_none() {
                    entity.source = Some(recognizer.name().to_string());
                }
            }
            combined.append(&mut entities);
        }

        combined.sort_by_key(|e| (e.start, e.end));
        Ok(combined)
    }
}
