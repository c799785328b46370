//! Open Trivia DB client.
//!
//! One question per request. Response codes other than 0 mean the service
//! has nothing for us (no results, bad parameters, rate limited, ...);
//! all of them end up as `QuestionUnavailable::NoQuestion`.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::core::{MinigameRng, Question, TriviaConfig};
use crate::error::QuestionUnavailable;

use super::{QuestionSource, TriviaRequest};

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestion {
    #[serde(rename = "type")]
    kind: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Decode an Open Trivia DB payload into a question.
///
/// Multiple choice candidates are the incorrect answers followed by the
/// correct one, shuffled with `rng`. Boolean questions keep the fixed
/// True/False order.
pub fn parse_response(body: &str, rng: &mut MinigameRng) -> Result<Question, QuestionUnavailable> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| QuestionUnavailable::Malformed(e.to_string()))?;

    if response.response_code != 0 {
        return Err(QuestionUnavailable::NoQuestion {
            code: response.response_code,
        });
    }

    let raw = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| QuestionUnavailable::Malformed("empty result set".to_string()))?;

    let prompt = decode(&raw.question);
    let correct = decode(&raw.correct_answer);

    let question = match raw.kind.as_str() {
        "boolean" => Question::boolean(prompt, correct)?,
        "multiple" => {
            let mut candidates: Vec<String> = raw.incorrect_answers.iter().map(|a| decode(a)).collect();
            candidates.push(correct.clone());
            rng.shuffle(&mut candidates);
            Question::multiple_choice(prompt, candidates, correct)?
        }
        other => {
            return Err(QuestionUnavailable::Malformed(format!("unknown question type {other:?}")));
        }
    };

    Ok(question)
}

/// Blocking HTTP source with a per-request timeout.
pub struct OpenTdbSource {
    client: reqwest::blocking::Client,
    base_url: String,
    timeout: Duration,
    rng: MinigameRng,
}

impl OpenTdbSource {
    /// Build a client from trivia settings.
    ///
    /// `rng` shuffles the answer order of fetched questions.
    pub fn new(config: &TriviaConfig, rng: MinigameRng) -> Result<Self, QuestionUnavailable> {
        let timeout = config.timeout();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| QuestionUnavailable::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout,
            rng,
        })
    }

    /// Query parameters for a request.
    #[must_use]
    pub fn query(request: &TriviaRequest) -> [(&'static str, String); 4] {
        [
            ("amount", "1".to_string()),
            ("category", request.subject.category_id().to_string()),
            ("difficulty", request.difficulty.api_name().to_string()),
            ("type", request.kind.api_name().to_string()),
        ]
    }

    fn classify(&self, error: reqwest::Error) -> QuestionUnavailable {
        if error.is_timeout() {
            QuestionUnavailable::Timeout(self.timeout)
        } else if error.is_decode() {
            QuestionUnavailable::Malformed(error.to_string())
        } else {
            QuestionUnavailable::Network(error.to_string())
        }
    }
}

impl QuestionSource for OpenTdbSource {
    fn request(&mut self, request: &TriviaRequest) -> Result<Question, QuestionUnavailable> {
        debug!(subject = %request.subject, kind = ?request.kind, "fetching trivia question");

        let body = self
            .client
            .get(&self.base_url)
            .query(&Self::query(request))
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|e| self.classify(e))?;

        parse_response(&body, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QuestionKind;
    use crate::source::{Difficulty, Subject};

    const MULTIPLE: &str = r#"{
        "response_code": 0,
        "results": [{
            "type": "multiple",
            "difficulty": "medium",
            "category": "History",
            "question": "Who wrote &quot;The Prince&quot;?",
            "correct_answer": "Niccol&ograve; Machiavelli",
            "incorrect_answers": ["Dante", "Petrarch", "Boccaccio"]
        }]
    }"#;

    const BOOLEAN: &str = r#"{
        "response_code": 0,
        "results": [{
            "type": "boolean",
            "question": "The atomic number of helium is 2.",
            "correct_answer": "True",
            "incorrect_answers": ["False"]
        }]
    }"#;

    #[test]
    fn test_parse_multiple_choice() {
        let mut rng = MinigameRng::new(1);
        let q = parse_response(MULTIPLE, &mut rng).unwrap();

        assert_eq!(q.kind(), QuestionKind::MultipleChoice);
        assert_eq!(q.prompt(), "Who wrote \"The Prince\"?");
        assert_eq!(q.correct(), "Niccolò Machiavelli");
        assert_eq!(q.candidates().len(), 4);
        assert!(q.candidates().iter().any(|c| c == "Dante"));
        assert_eq!(q.candidate(q.correct_index()), Some("Niccolò Machiavelli"));
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let a = parse_response(MULTIPLE, &mut MinigameRng::new(5)).unwrap();
        let b = parse_response(MULTIPLE, &mut MinigameRng::new(5)).unwrap();
        assert_eq!(a.candidates(), b.candidates());
    }

    #[test]
    fn test_parse_boolean_keeps_order() {
        let q = parse_response(BOOLEAN, &mut MinigameRng::new(1)).unwrap();

        assert_eq!(q.kind(), QuestionKind::Boolean);
        assert_eq!(q.candidates(), &["True".to_string(), "False".to_string()][..]);
        assert_eq!(q.correct_index(), 0);
    }

    #[test]
    fn test_nonzero_response_code() {
        let err = parse_response(r#"{"response_code": 1, "results": []}"#, &mut MinigameRng::new(1)).unwrap_err();
        assert_eq!(err, QuestionUnavailable::NoQuestion { code: 1 });

        let err = parse_response(r#"{"response_code": 5}"#, &mut MinigameRng::new(1)).unwrap_err();
        assert_eq!(err, QuestionUnavailable::NoQuestion { code: 5 });
    }

    #[test]
    fn test_empty_results() {
        let err = parse_response(r#"{"response_code": 0, "results": []}"#, &mut MinigameRng::new(1)).unwrap_err();
        assert!(matches!(err, QuestionUnavailable::Malformed(_)));
    }

    #[test]
    fn test_garbage_body() {
        let err = parse_response("<html>502</html>", &mut MinigameRng::new(1)).unwrap_err();
        assert!(matches!(err, QuestionUnavailable::Malformed(_)));
    }

    #[test]
    fn test_unknown_type() {
        let body = r#"{"response_code":0,"results":[{"type":"essay","question":"?","correct_answer":"a","incorrect_answers":[]}]}"#;
        let err = parse_response(body, &mut MinigameRng::new(1)).unwrap_err();
        assert!(matches!(err, QuestionUnavailable::Malformed(_)));
    }

    #[test]
    fn test_lowercase_boolean_is_invalid() {
        let body = r#"{"response_code":0,"results":[{"type":"boolean","question":"?","correct_answer":"true","incorrect_answers":["false"]}]}"#;
        let err = parse_response(body, &mut MinigameRng::new(1)).unwrap_err();
        assert!(matches!(err, QuestionUnavailable::InvalidQuestion(_)));
    }

    #[test]
    fn test_query_parameters() {
        let request = TriviaRequest::multiple_choice(Subject::Computers).with_difficulty(Difficulty::Easy);
        let query = OpenTdbSource::query(&request);

        assert_eq!(query[0], ("amount", "1".to_string()));
        assert_eq!(query[1], ("category", "18".to_string()));
        assert_eq!(query[2], ("difficulty", "easy".to_string()));
        assert_eq!(query[3], ("type", "multiple".to_string()));
    }

    #[test]
    fn test_unreachable_host_is_unavailable() {
        let config = TriviaConfig {
            base_url: "http://127.0.0.1:9/api.php".to_string(),
            timeout_secs: 0.5,
            ..TriviaConfig::default()
        };
        let mut source = OpenTdbSource::new(&config, MinigameRng::new(1)).unwrap();

        let err = source
            .request(&TriviaRequest::multiple_choice(Subject::Art))
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionUnavailable::Network(_) | QuestionUnavailable::Timeout(_)
        ));
    }
}
