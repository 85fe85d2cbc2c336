use crate::error::{AppResult, RecommendationError};
use crate::models::{AestheticProfile, QuizAnswer, QuizAnswers};
use std::collections::{BTreeMap, BTreeSet};

/// Aesthetic used when no answer carries a label
pub const DEFAULT_AESTHETIC: &str = "Classic";

/// Score used when no answer carries a label
pub const DEFAULT_SCORE: u8 = 50;

const DESCRIPTION_TAG_COUNT: usize = 3;

/// Derive the aesthetic profile for a set of quiz answers
///
/// The dominant aesthetic is the most frequent label. Equal counts resolve to
/// the lexicographically smallest label. The score is the dominant label's
/// share of all answers, including answers without a label.
pub fn analyze_answers(answers: &QuizAnswers) -> AestheticProfile {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    let mut tags = BTreeSet::new();

    for answer in answers.values() {
        if let Some(label) = answer.aesthetic_label() {
            *tally.entry(label).or_insert(0) += 1;
        }

        if let Some(answer_tags) = &answer.tags {
            tags.extend(
                answer_tags
                    .iter()
                    .filter(|tag| !tag.is_empty())
                    .cloned(),
            );
        }
    }

    // Higher count wins, then the smaller label
    let top = tally
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(label, count)| (*label, *count));

    let (dominant, score) = match top {
        Some((label, count)) => (label.to_string(), share_score(count, answers.len())),
        None => (DEFAULT_AESTHETIC.to_string(), DEFAULT_SCORE),
    };

    let description = describe(&dominant, &tags);

    AestheticProfile {
        dominant,
        score,
        tags,
        description,
    }
}

#[inline]
fn share_score(count: usize, total: usize) -> u8 {
    if total == 0 {
        return DEFAULT_SCORE;
    }
    let pct = (100.0 * count as f64 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

fn describe(dominant: &str, tags: &BTreeSet<String>) -> String {
    let highlights: Vec<&str> = tags
        .iter()
        .take(DESCRIPTION_TAG_COUNT)
        .map(String::as_str)
        .collect();

    if highlights.is_empty() {
        format!("Your style is {}.", dominant)
    } else {
        format!(
            "Your style is {}, with {} elements.",
            dominant,
            highlights.join(", ")
        )
    }
}

/// Decode a raw answers value into typed answers
///
/// `null` is an empty submission. Anything other than an object whose values
/// are answer objects is rejected.
pub fn parse_answers(value: &serde_json::Value) -> AppResult<QuizAnswers> {
    match value {
        serde_json::Value::Null => Ok(QuizAnswers::new()),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(question, raw)| {
                if !raw.is_object() {
                    return Err(RecommendationError::InvalidArgument(format!(
                        "answer {:?} must be an object",
                        question
                    )));
                }
                serde_json::from_value::<QuizAnswer>(raw.clone())
                    .map(|answer| (question.clone(), answer))
                    .map_err(|e| {
                        RecommendationError::InvalidArgument(format!(
                            "answer {:?} is malformed: {}",
                            question, e
                        ))
                    })
            })
            .collect(),
        _ => Err(RecommendationError::InvalidArgument(
            "answers must be an object keyed by question id".to_string(),
        )),
    }
}
