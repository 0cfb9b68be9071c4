//! HTTP client for the homework statuses endpoint

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
};

/// Anything that can return the raw decoded statuses payload for a cursor
pub trait ReviewSource {
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Pure HTTP client for the review API
#[derive(Debug)]
pub struct ReviewApi {
    client: Client,
    endpoint: String,
    token: String,
}

impl ReviewApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.to_string(),
            token: config.review_token.to_string(),
        })
    }

    /// Handle HTTP response and decode the JSON body
    async fn handle_response(&self, response: Response) -> Result<Value> {
        let url_path = response.url().path().to_string();
        let status = response.status();

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), path = %url_path, "Review API returned non-OK status");
            return Err(ClientError::HttpStatus { status: status.as_u16() });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(path = %url_path, error = %e, body_length = body.len(), "Response body is not JSON");
            ClientError::decode(url_path, "Failed to parse response", e)
        })
    }
}

impl ReviewSource for ReviewApi {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Review API request failed"))?;

        let payload = self.handle_response(response).await?;
        debug!("Successfully fetched homework statuses");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    use super::*;

    async fn api_for(server: &MockServer) -> ReviewApi {
        let config = ClientConfig::new("review-token", "bot-token")
            .with_endpoint(format!("{}/api/user_api/homework_statuses/", server.uri()));
        ReviewApi::new(&config).unwrap()
    }

    #[tokio::test]
    async fn sends_oauth_header_and_cursor() {
        let server = MockServer::start().await;
        let body = json!({"homeworks": [], "current_date": 1000});
        Mock::given(method("GET"))
            .and(path("/api/user_api/homework_statuses/"))
            .and(header("Authorization", "OAuth review-token"))
            .and(query_param("from_date", "123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let payload = api_for(&server).await.fetch(123).await.unwrap();
        assert_eq!(payload, body);
    }

    #[tokio::test]
    async fn non_ok_status_is_an_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = api_for(&server).await.fetch(0).await.unwrap_err();
        assert!(matches!(err, ClientError::HttpStatus { status: 503 }));
    }

    #[tokio::test]
    async fn other_success_codes_are_not_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = api_for(&server).await.fetch(0).await.unwrap_err();
        assert!(matches!(err, ClientError::HttpStatus { status: 204 }));
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = api_for(&server).await.fetch(0).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let config = ClientConfig::new("t", "b").with_endpoint("http://127.0.0.1:1/statuses/");
        let err = ReviewApi::new(&config).unwrap().fetch(0).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
