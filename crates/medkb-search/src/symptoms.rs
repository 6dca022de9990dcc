//! Symptom checker: fuzzy symptom matching, related diseases, urgency and
//! advice.
//!
//! Each caller phrase is normalized and compared with every active catalog
//! symptom through a [`Similarity`] capability. The best match above the
//! threshold wins; ties go to the longer (more specific) symptom name, then
//! the lower id. Phrases without a match are dropped silently.

use std::cmp::Ordering;
use std::sync::Arc;

use medkb_config::SymptomConfig;
use medkb_core::entities::{DiseaseInformation, SymptomInformation};
use medkb_core::enums::UrgencyLevel;
use medkb_core::responses::{
    MEDICAL_DISCLAIMER, MatchedSymptom, RelatedDisease, SymptomAssessment, SymptomCheckFailure,
    SymptomCheckOutcome,
};
use serde::{Deserialize, Serialize};

use crate::corpus::ContentStore;
use crate::error::SearchError;
use crate::similarity::{PartialRatio, Similarity};
use crate::text;

const GENERIC_ADVICE: [&str; 3] = [
    "Uống đủ nước",
    "Nghỉ ngơi đầy đủ",
    "Không tự ý dùng thuốc khi chưa có chỉ định của bác sĩ",
];

const YOUNG_CHILD_MAX_AGE: u32 = 5;
const ELDERLY_MIN_AGE: u32 = 65;
const PROLONGED_DAYS: u32 = 7;

/// Optional facts about the patient that add advice without changing urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomContext {
    pub age: Option<u32>,
    pub duration_days: Option<u32>,
}

impl SymptomContext {
    fn advisory(&self) -> Option<&'static str> {
        match (self.age, self.duration_days) {
            (Some(age), _) if age < YOUNG_CHILD_MAX_AGE => {
                Some("Trẻ dưới 5 tuổi cần được bác sĩ nhi khoa thăm khám sớm")
            }
            (Some(age), _) if age >= ELDERLY_MIN_AGE => {
                Some("Người cao tuổi nên được bác sĩ thăm khám sớm hơn bình thường")
            }
            (_, Some(days)) if days >= PROLONGED_DAYS => {
                Some("Triệu chứng kéo dài trên một tuần cần được bác sĩ đánh giá")
            }
            _ => None,
        }
    }
}

/// A disease found by name or classification code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseMatch {
    pub disease: DiseaseInformation,
    /// Similarity on the 0–100 scale; 100 for a code match.
    pub score: f64,
}

const fn urgency_action(urgency: UrgencyLevel) -> &'static str {
    match urgency {
        UrgencyLevel::Emergency => "Gọi cấp cứu 115 ngay lập tức hoặc đến cơ sở y tế gần nhất",
        UrgencyLevel::High => "Nên đi khám bác sĩ trong vòng 24 giờ",
        UrgencyLevel::Medium => "Nên đặt lịch khám bác sĩ trong thời gian sớm",
        UrgencyLevel::Low => "Theo dõi triệu chứng tại nhà",
    }
}

/// Prefer higher score, then the longer name, then the lower id.
fn better_candidate(score: f64, name: &str, id: &str, best: (f64, &str, &str)) -> bool {
    match score.partial_cmp(&best.0).unwrap_or(Ordering::Equal) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match name.chars().count().cmp(&best.1.chars().count()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => id < best.2,
        },
    }
}

pub struct SymptomMatcher {
    store: Arc<dyn ContentStore>,
    similarity: Arc<dyn Similarity>,
    config: SymptomConfig,
}

impl std::fmt::Debug for SymptomMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymptomMatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SymptomMatcher {
    /// Matcher using [`PartialRatio`] similarity.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, config: SymptomConfig) -> Self {
        Self::with_similarity(store, Arc::new(PartialRatio), config)
    }

    #[must_use]
    pub fn with_similarity(
        store: Arc<dyn ContentStore>,
        similarity: Arc<dyn Similarity>,
        config: SymptomConfig,
    ) -> Self {
        Self {
            store,
            similarity,
            config,
        }
    }

    /// Assess free-text symptom phrases.
    ///
    /// Never fails: a store error becomes [`SymptomCheckOutcome::Failed`],
    /// which still carries the disclaimer.
    pub fn check<S: AsRef<str>>(
        &self,
        phrases: &[S],
        context: Option<&SymptomContext>,
    ) -> SymptomCheckOutcome {
        match self.try_check(phrases, context) {
            Ok(assessment) => SymptomCheckOutcome::Assessed(assessment),
            Err(e) => {
                tracing::warn!(error = %e, "symptom check failed");
                SymptomCheckOutcome::Failed(SymptomCheckFailure::new(e.to_string()))
            }
        }
    }

    fn try_check<S: AsRef<str>>(
        &self,
        phrases: &[S],
        context: Option<&SymptomContext>,
    ) -> Result<SymptomAssessment, SearchError> {
        let catalog: Vec<(SymptomInformation, String)> = self
            .store
            .symptoms()?
            .into_iter()
            .filter(|s| s.is_active)
            .map(|s| {
                let normalized = text::normalize(&s.name);
                (s, normalized)
            })
            .collect();

        let mut matched: Vec<(MatchedSymptom, &SymptomInformation)> = Vec::new();
        for phrase in phrases {
            let raw = phrase.as_ref();
            let Some((symptom, score)) = self.best_symptom(raw, &catalog) else {
                tracing::debug!(phrase = raw, "no symptom above threshold");
                continue;
            };
            if matched.iter().any(|(m, _)| m.symptom_id == symptom.id) {
                continue;
            }
            matched.push((
                MatchedSymptom {
                    symptom_id: symptom.id.clone(),
                    name: symptom.name.clone(),
                    input: raw.to_string(),
                    match_score: score,
                    urgency_level: symptom.urgency_level,
                    body_part: symptom.body_part.clone(),
                },
                symptom,
            ));
        }

        let related_diseases = if matched.is_empty() {
            Vec::new()
        } else {
            let symptoms: Vec<&SymptomInformation> = matched.iter().map(|(_, s)| *s).collect();
            self.related_diseases(&symptoms)?
        };

        let urgency = matched
            .iter()
            .map(|(m, _)| m.urgency_level)
            .max()
            .unwrap_or_default();

        let recommendations = self.recommendations(urgency, &matched, context);

        Ok(SymptomAssessment {
            matched_symptoms: matched.into_iter().map(|(m, _)| m).collect(),
            related_diseases,
            urgency,
            recommendations,
            disclaimer: MEDICAL_DISCLAIMER.to_string(),
        })
    }

    fn best_symptom<'a>(
        &self,
        phrase: &str,
        catalog: &'a [(SymptomInformation, String)],
    ) -> Option<(&'a SymptomInformation, f64)> {
        let normalized = text::normalize(phrase);
        if normalized.is_empty() {
            return None;
        }

        let mut best: Option<(&SymptomInformation, f64)> = None;
        for (symptom, name) in catalog {
            let score = self.similarity.similarity(&normalized, name);
            if score <= self.config.match_threshold {
                continue;
            }
            let replace = best.is_none_or(|(current, current_score)| {
                better_candidate(
                    score,
                    &symptom.name,
                    &symptom.id,
                    (current_score, &current.name, &current.id),
                )
            });
            if replace {
                best = Some((symptom, score));
            }
        }
        best
    }

    #[allow(clippy::cast_precision_loss)]
    fn related_diseases(
        &self,
        matched: &[&SymptomInformation],
    ) -> Result<Vec<RelatedDisease>, SearchError> {
        let mut related: Vec<(DiseaseInformation, usize)> = self
            .store
            .diseases()?
            .into_iter()
            .filter(|d| d.is_active)
            .filter_map(|d| {
                let count = matched
                    .iter()
                    .filter(|s| d.symptom_ids.contains(&s.id) || s.related_disease_ids.contains(&d.id))
                    .count();
                (count > 0).then_some((d, count))
            })
            .collect();

        related.sort_by(|(a, a_count), (b, b_count)| {
            b_count
                .cmp(a_count)
                .then_with(|| b.severity.cmp(&a.severity))
                .then_with(|| a.id.cmp(&b.id))
        });
        related.truncate(self.config.max_related_diseases);

        let total = matched.len() as f64;
        Ok(related
            .into_iter()
            .map(|(d, count)| RelatedDisease {
                match_fraction: (count as f64 / total).min(1.0),
                matched_symptoms: count,
                disease_id: d.id,
                name: d.name,
                icd_code: d.icd_code,
                severity: d.severity,
                is_contagious: d.is_contagious,
                is_chronic: d.is_chronic,
            })
            .collect())
    }

    fn recommendations(
        &self,
        urgency: UrgencyLevel,
        matched: &[(MatchedSymptom, &SymptomInformation)],
        context: Option<&SymptomContext>,
    ) -> Vec<String> {
        let mut advice: Vec<String> = vec![urgency_action(urgency).to_string()];
        if let Some(note) = context.and_then(SymptomContext::advisory) {
            advice.push(note.to_string());
        }

        let home_care = matched
            .iter()
            .filter_map(|(_, s)| s.home_care.as_deref())
            .map(str::trim)
            .filter(|h| !h.is_empty());
        for tip in home_care.chain(GENERIC_ADVICE) {
            if !advice.iter().any(|a| a == tip) {
                advice.push(tip.to_string());
            }
        }

        advice.truncate(self.config.max_recommendations);
        advice
    }

    /// Find an active disease by classification code (exact, case-insensitive)
    /// or by fuzzy name match above the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] for a query with nothing to
    /// match on, and store errors.
    pub fn lookup_disease(&self, query: &str) -> Result<Option<DiseaseMatch>, SearchError> {
        let wanted = query.trim();
        if text::normalize(wanted).is_empty() {
            return Err(SearchError::InvalidQuery(format!(
                "disease query {query:?} has no searchable text"
            )));
        }
        let diseases: Vec<DiseaseInformation> = self
            .store
            .diseases()?
            .into_iter()
            .filter(|d| d.is_active)
            .collect();

        if let Some(disease) = diseases.iter().find(|d| {
            d.icd_code
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(wanted))
        }) {
            return Ok(Some(DiseaseMatch {
                disease: disease.clone(),
                score: 100.0,
            }));
        }

        let normalized = text::normalize(wanted);
        let mut best: Option<(&DiseaseInformation, f64)> = None;
        for disease in &diseases {
            let score = self
                .similarity
                .similarity(&normalized, &text::normalize(&disease.name));
            if score <= self.config.match_threshold {
                continue;
            }
            let replace = best.is_none_or(|(current, current_score)| {
                better_candidate(
                    score,
                    &disease.name,
                    &disease.id,
                    (current_score, &current.name, &current.id),
                )
            });
            if replace {
                best = Some((disease, score));
            }
        }
        Ok(best.map(|(disease, score)| DiseaseMatch {
            disease: disease.clone(),
            score,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::InMemoryCorpus;
    use medkb_core::enums::SeverityLevel;
    use pretty_assertions::assert_eq;

    fn symptom(id: &str, name: &str, urgency: UrgencyLevel) -> SymptomInformation {
        SymptomInformation {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            body_part: None,
            urgency_level: urgency,
            possible_causes: None,
            when_to_see_doctor: None,
            home_care: None,
            related_disease_ids: Vec::new(),
            is_active: true,
        }
    }

    fn disease(id: &str, name: &str, severity: SeverityLevel, symptoms: &[&str]) -> DiseaseInformation {
        DiseaseInformation {
            id: id.to_string(),
            name: name.to_string(),
            icd_code: None,
            description: String::new(),
            causes: None,
            diagnosis: None,
            treatment: None,
            prevention: None,
            complications: None,
            prognosis: None,
            severity,
            is_contagious: false,
            is_chronic: false,
            symptom_ids: symptoms.iter().map(|s| (*s).to_string()).collect(),
            related_disease_ids: Vec::new(),
            is_active: true,
        }
    }

    fn matcher(symptoms: Vec<SymptomInformation>, diseases: Vec<DiseaseInformation>) -> SymptomMatcher {
        let corpus = InMemoryCorpus::new();
        for s in symptoms {
            corpus.upsert_symptom(s).unwrap();
        }
        for d in diseases {
            corpus.upsert_disease(d).unwrap();
        }
        SymptomMatcher::new(Arc::new(corpus), SymptomConfig::default())
    }

    fn assessed(outcome: SymptomCheckOutcome) -> SymptomAssessment {
        match outcome {
            SymptomCheckOutcome::Assessed(a) => a,
            SymptomCheckOutcome::Failed(f) => panic!("unexpected failure: {}", f.error),
        }
    }

    #[test]
    fn more_specific_symptom_wins_a_tie() {
        let m = matcher(
            vec![
                symptom("s-pain", "Đau", UrgencyLevel::Low),
                symptom("s-head", "Đau đầu", UrgencyLevel::Medium),
            ],
            Vec::new(),
        );
        let a = assessed(m.check(&["đau đầu dữ dội"], None));
        assert_eq!(a.matched_symptoms.len(), 1);
        assert_eq!(a.matched_symptoms[0].symptom_id, "s-head");
        assert_eq!(a.matched_symptoms[0].input, "đau đầu dữ dội");
    }

    #[test]
    fn repeated_phrases_match_once() {
        let m = matcher(vec![symptom("s-fever", "Sốt", UrgencyLevel::Medium)], Vec::new());
        let a = assessed(m.check(&["sốt", "SỐT cao"], None));
        assert_eq!(a.matched_symptoms.len(), 1);
    }

    #[test]
    fn decomposed_phrase_matches_composed_catalog_name() {
        let m = matcher(vec![symptom("s-fever", "Sốt", UrgencyLevel::Medium)], Vec::new());
        let a = assessed(m.check(&["so\u{0302}\u{0301}t cao"], None));
        assert_eq!(a.matched_symptoms.len(), 1);
        assert_eq!(a.matched_symptoms[0].symptom_id, "s-fever");
        assert_eq!(a.urgency, UrgencyLevel::Medium);
    }

    #[test]
    fn inactive_symptoms_are_ignored() {
        let mut hidden = symptom("s-fever", "Sốt", UrgencyLevel::High);
        hidden.is_active = false;
        let m = matcher(vec![hidden], Vec::new());
        let a = assessed(m.check(&["sốt"], None));
        assert!(a.matched_symptoms.is_empty());
        assert_eq!(a.urgency, UrgencyLevel::Low);
    }

    #[test]
    fn diseases_rank_by_overlap_then_severity() {
        let m = matcher(
            vec![
                symptom("s-fever", "Sốt", UrgencyLevel::Medium),
                symptom("s-cough", "Ho", UrgencyLevel::Low),
            ],
            vec![
                disease("d-cold", "Cảm lạnh", SeverityLevel::Mild, &["s-cough"]),
                disease("d-flu", "Cúm", SeverityLevel::Moderate, &["s-fever", "s-cough"]),
                disease("d-pneu", "Viêm phổi", SeverityLevel::Severe, &["s-fever"]),
            ],
        );
        let a = assessed(m.check(&["sốt", "ho"], None));
        let ids: Vec<&str> = a.related_diseases.iter().map(|d| d.disease_id.as_str()).collect();
        assert_eq!(ids, vec!["d-flu", "d-pneu", "d-cold"]);
        assert!((a.related_diseases[0].match_fraction - 1.0).abs() < f64::EPSILON);
        assert!((a.related_diseases[1].match_fraction - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn symptom_side_links_count_too() {
        let mut fever = symptom("s-fever", "Sốt", UrgencyLevel::Medium);
        fever.related_disease_ids = vec!["d-dengue".to_string()];
        let m = matcher(
            vec![fever],
            vec![disease("d-dengue", "Sốt xuất huyết", SeverityLevel::Severe, &[])],
        );
        let a = assessed(m.check(&["sốt"], None));
        assert_eq!(a.related_diseases.len(), 1);
        assert_eq!(a.related_diseases[0].matched_symptoms, 1);
    }

    #[test]
    fn related_diseases_are_capped() {
        let diseases = (0..8)
            .map(|i| disease(&format!("d-{i}"), &format!("Bệnh {i}"), SeverityLevel::Mild, &["s-fever"]))
            .collect();
        let m = matcher(vec![symptom("s-fever", "Sốt", UrgencyLevel::Medium)], diseases);
        let a = assessed(m.check(&["sốt"], None));
        assert_eq!(a.related_diseases.len(), 5);
    }

    #[test]
    fn recommendations_follow_urgency_home_care_then_generic() {
        let mut fever = symptom("s-fever", "Sốt", UrgencyLevel::Medium);
        fever.home_care = Some("Chườm mát".to_string());
        let m = matcher(vec![fever], Vec::new());
        let a = assessed(m.check(&["sốt"], None));
        assert_eq!(
            a.recommendations,
            vec![
                "Nên đặt lịch khám bác sĩ trong thời gian sớm",
                "Chườm mát",
                "Uống đủ nước",
                "Nghỉ ngơi đầy đủ",
                "Không tự ý dùng thuốc khi chưa có chỉ định của bác sĩ",
            ]
        );
    }

    #[test]
    fn context_adds_one_advisory_after_urgency() {
        let mut fever = symptom("s-fever", "Sốt", UrgencyLevel::Medium);
        fever.home_care = Some("Chườm mát".to_string());
        let m = matcher(vec![fever], Vec::new());
        let context = SymptomContext {
            age: Some(3),
            duration_days: Some(10),
        };
        let a = assessed(m.check(&["sốt"], Some(&context)));
        assert_eq!(a.urgency, UrgencyLevel::Medium);
        assert_eq!(a.recommendations.len(), 5);
        assert_eq!(
            a.recommendations[1],
            "Trẻ dưới 5 tuổi cần được bác sĩ nhi khoa thăm khám sớm"
        );
        assert_eq!(a.recommendations[2], "Chườm mát");
    }

    #[test]
    fn adult_short_illness_has_no_advisory() {
        let context = SymptomContext {
            age: Some(30),
            duration_days: Some(2),
        };
        assert!(context.advisory().is_none());
        let prolonged = SymptomContext {
            age: Some(30),
            duration_days: Some(7),
        };
        assert!(prolonged.advisory().is_some());
    }

    #[test]
    fn disease_lookup_by_code_or_name() {
        let mut flu = disease("d-flu", "Cúm mùa", SeverityLevel::Moderate, &[]);
        flu.icd_code = Some("J11".to_string());
        let m = matcher(Vec::new(), vec![flu]);

        let by_code = m.lookup_disease("j11").unwrap().unwrap();
        assert_eq!(by_code.disease.id, "d-flu");
        assert!((by_code.score - 100.0).abs() < f64::EPSILON);

        let by_name = m.lookup_disease("bệnh cúm mùa").unwrap().unwrap();
        assert_eq!(by_name.disease.id, "d-flu");

        assert!(m.lookup_disease("gãy xương").unwrap().is_none());
        assert!(matches!(
            m.lookup_disease("  "),
            Err(SearchError::InvalidQuery(_))
        ));
        assert!(matches!(
            m.lookup_disease("?!"),
            Err(SearchError::InvalidQuery(_))
        ));
    }
}
