//! Open Trivia DB (opentdb.com) question source.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use trivia_core::model::{BankQuery, Category, RawQuestion};
use trivia_core::traits::QuestionSource;
use trivia_core::LoadError;

use crate::error::{check_response_code, from_transport};

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// The bank never serves more than this many questions per request.
pub const MAX_AMOUNT: u32 = 50;

/// HTTP client for the Open Trivia DB API.
pub struct OpenTdbSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenTdbSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the categories the bank offers.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn categories(&self) -> Result<Vec<Category>, LoadError> {
        let response = self
            .client
            .get(format!("{}/api_category.php", self.base_url))
            .send()
            .await
            .map_err(|e| from_transport(e, &self.base_url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::NetworkFailure(format!(
                "category list returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: CategoryResponse = response.json().await.map_err(|e| {
            LoadError::MalformedResponse(format!("failed to parse category list: {e}"))
        })?;
        Ok(body.trivia_categories)
    }
}

/// A missing `response_code` counts as success.
#[derive(Deserialize)]
struct QuestionResponse {
    #[serde(default)]
    response_code: u32,
    results: Option<Vec<RawQuestion>>,
}

#[derive(Deserialize)]
struct CategoryResponse {
    trivia_categories: Vec<Category>,
}

/// Build the `api.php` query string for `query`.
pub fn query_string(query: &BankQuery) -> String {
    let mut params = vec![format!("amount={}", query.amount.clamp(1, MAX_AMOUNT))];
    if let Some(category) = query.category {
        params.push(format!("category={category}"));
    }
    if let Some(difficulty) = query.difficulty {
        params.push(format!("difficulty={difficulty}"));
    }
    if let Some(question_type) = query.question_type {
        params.push(format!("type={question_type}"));
    }
    params.join("&")
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    #[instrument(skip(self, query), fields(base_url = %self.base_url))]
    async fn fetch(&self, query: &BankQuery) -> Result<Vec<RawQuestion>, LoadError> {
        let url = format!("{}/api.php?{}", self.base_url, query_string(query));
        tracing::debug!(%url, "requesting questions");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| from_transport(e, &self.base_url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::NetworkFailure(format!(
                "question bank returned HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let body: QuestionResponse = response.json().await.map_err(|e| {
            LoadError::MalformedResponse(format!("failed to parse response: {e}"))
        })?;

        if !check_response_code(body.response_code)? {
            tracing::warn!(
                amount = query.amount,
                "bank has too few questions for this query"
            );
            return Ok(Vec::new());
        }
        body.results.ok_or_else(|| {
            LoadError::MalformedResponse("response has no `results` field".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{Difficulty, QuestionType};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> OpenTdbSource {
        OpenTdbSource::new(&server.uri(), 5).unwrap()
    }

    #[test]
    fn query_string_includes_set_fields() {
        let qs = query_string(&BankQuery::default());
        assert_eq!(qs, "amount=50&category=18&difficulty=medium&type=multiple");

        let bare = BankQuery {
            amount: 5,
            category: None,
            difficulty: None,
            question_type: Some(QuestionType::Boolean),
        };
        assert_eq!(query_string(&bare), "amount=5&type=boolean");
    }

    #[test]
    fn query_string_clamps_amount() {
        let huge = BankQuery {
            amount: 500,
            ..BankQuery::default()
        };
        assert!(query_string(&huge).starts_with("amount=50&"));
        let zero = BankQuery {
            amount: 0,
            ..BankQuery::default()
        };
        assert!(query_string(&zero).starts_with("amount=1&"));
    }

    #[tokio::test]
    async fn fetches_and_parses_results() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "response_code": 0,
            "results": [{
                "type": "multiple",
                "difficulty": "medium",
                "category": "Science: Computers",
                "question": "What does &quot;HTTP&quot; stand for?",
                "correct_answer": "Hypertext Transfer Protocol",
                "incorrect_answers": ["High Transfer Text Protocol", "Hyperlink Text Process", "Home Tool Transfer Protocol"]
            }]
        });

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .and(query_param("amount", "10"))
            .and(query_param("category", "18"))
            .and(query_param("difficulty", "hard"))
            .and(query_param("type", "multiple"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let query = BankQuery {
            amount: 10,
            difficulty: Some(Difficulty::Hard),
            ..BankQuery::default()
        };
        let results = source(&server).fetch(&query).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].correct_answer, "Hypertext Transfer Protocol");
        assert_eq!(results[0].incorrect_answers.len(), 3);
        assert!(results[0].question.contains("&quot;"));
    }

    #[tokio::test]
    async fn no_results_code_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response_code": 1, "results": []})),
            )
            .mount(&server)
            .await;

        let results = source(&server)
            .fetch(&BankQuery::default())
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn rate_limit_code_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response_code": 5, "results": []})),
            )
            .mount(&server)
            .await;

        let err = source(&server)
            .fetch(&BankQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Rejected { code: 5, .. }));
    }

    #[tokio::test]
    async fn server_error_is_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = source(&server)
            .fetch(&BankQuery::default())
            .await
            .unwrap_err();
        match err {
            LoadError::NetworkFailure(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("maintenance"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = source(&server)
            .fetch(&BankQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn wrong_shape_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response_code": 0,
                "results": [{"question": "Missing answers?"}]
            })))
            .mount(&server)
            .await;

        let err = source(&server)
            .fetch(&BankQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn missing_response_code_means_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "question": "Capital of France?",
                    "correct_answer": "Paris",
                    "incorrect_answers": ["Rome", "Madrid", "Berlin"]
                }]
            })))
            .mount(&server)
            .await;

        let results = source(&server)
            .fetch(&BankQuery::default())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].correct_answer, "Paris");
        assert_eq!(results[0].category, None);
    }

    #[tokio::test]
    async fn missing_results_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response_code": 0})),
            )
            .mount(&server)
            .await;

        let err = source(&server)
            .fetch(&BankQuery::default())
            .await
            .unwrap_err();
        match err {
            LoadError::MalformedResponse(msg) => assert!(msg.contains("results")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejection_without_results_keeps_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response_code": 2})),
            )
            .mount(&server)
            .await;

        let err = source(&server)
            .fetch(&BankQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Rejected { code: 2, .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_failure() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let source = OpenTdbSource::new(&uri, 2).unwrap();
        let err = source.fetch(&BankQuery::default()).await.unwrap_err();
        assert!(matches!(err, LoadError::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn lists_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api_category.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "trivia_categories": [
                    {"id": 9, "name": "General Knowledge"},
                    {"id": 18, "name": "Science: Computers"}
                ]
            })))
            .mount(&server)
            .await;

        let categories = source(&server).categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].id, 18);
        assert_eq!(categories[1].name, "Science: Computers");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let source = OpenTdbSource::new("http://localhost:9999/", 1).unwrap();
        assert_eq!(source.base_url(), "http://localhost:9999");
    }
}
