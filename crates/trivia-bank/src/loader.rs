//! Turns raw bank questions into playable ones.
//!
//! Decodes HTML entities in every text field and fixes each question's option
//! order with one shuffle.

use rand::Rng;
use tracing::instrument;

use trivia_core::model::{BankQuery, Question, RawQuestion};
use trivia_core::shuffle::shuffle;
use trivia_core::traits::QuestionSource;
use trivia_core::LoadError;

/// Fetch questions from `source` and prepare them for play.
///
/// On any failure no questions are returned.
#[instrument(skip(source, rng), fields(source = source.name(), amount = query.amount))]
pub async fn load<R: Rng>(
    source: &dyn QuestionSource,
    query: &BankQuery,
    rng: &mut R,
) -> Result<Vec<Question>, LoadError> {
    let raw = source.fetch(query).await?;
    let questions = raw
        .into_iter()
        .enumerate()
        .map(|(index, raw)| prepare(raw, rng).map_err(|e| with_index(e, index)))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(count = questions.len(), "questions loaded");
    Ok(questions)
}

/// Decode one raw question and shuffle its options.
pub fn prepare<R: Rng>(raw: RawQuestion, rng: &mut R) -> Result<Question, LoadError> {
    let prompt = decode_entities(&raw.question);
    let correct_answer = decode_entities(&raw.correct_answer);
    let incorrect: Vec<String> = raw
        .incorrect_answers
        .iter()
        .map(|a| decode_entities(a))
        .collect();

    if prompt.trim().is_empty() {
        return Err(LoadError::MalformedResponse("empty question text".into()));
    }
    if incorrect.is_empty() {
        return Err(LoadError::MalformedResponse(format!(
            "no incorrect answers for {prompt:?}"
        )));
    }
    if incorrect.contains(&correct_answer) {
        return Err(LoadError::MalformedResponse(format!(
            "correct answer {correct_answer:?} is also listed as incorrect"
        )));
    }

    let mut all = incorrect;
    all.push(correct_answer.clone());
    let options = shuffle(&all, rng);

    Ok(Question {
        prompt,
        correct_answer,
        options,
        category: raw.category.as_deref().map(decode_entities),
        difficulty: raw.difficulty,
    })
}

/// Replace HTML entities such as `&quot;` or `&#039;` with their characters.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

fn with_index(err: LoadError, index: usize) -> LoadError {
    match err {
        LoadError::MalformedResponse(msg) => {
            LoadError::MalformedResponse(format!("question {index}: {msg}"))
        }
        other => other,
    }
}
