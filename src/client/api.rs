use reqwest::{
    Client, Method, RequestBuilder, StatusCode, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use super::ClientConfig;
use crate::{
    models::{CreateTodoRequest, Todo, TodoId, UpdateTodoRequest},
    response::Envelope,
};

const TODOS_PATH: &str = "api/todos";

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server answered {status} with a body that is not an envelope: {source}")]
    InvalidResponse {
        status: StatusCode,
        source: serde_json::Error,
    },
    #[error("{message}: {}", .error.as_deref().unwrap_or("no details"))]
    Api {
        message: String,
        error: Option<String>,
    },
    #[error("{0} response carried no data")]
    MissingData(&'static str),
    #[error("no todo is selected")]
    NothingSelected,
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err)
        } else {
            ClientError::Transport(err)
        }
    }
}

impl<T> Envelope<T> {
    /// Failure envelopes become [`ClientError::Api`]; success yields `data`.
    pub fn into_result(self) -> ClientResult<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ClientError::Api {
                message: self.message,
                error: self.error,
            })
        }
    }
}

/// HTTP client for the todo API. No call is ever retried.
#[derive(Clone)]
pub struct TodoClient {
    http: Client,
    base_url: Url,
}

impl TodoClient {
    pub fn new(cfg: ClientConfig) -> ClientResult<Self> {
        let mut raw = cfg.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|err| ClientError::InvalidBaseUrl {
            url: cfg.base_url.clone(),
            reason: err.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .timeout(cfg.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list(&self) -> ClientResult<Vec<Todo>> {
        let envelope: Envelope<Vec<Todo>> = self.send(self.request(Method::GET, None)?).await?;
        Ok(envelope.into_result()?.unwrap_or_default())
    }

    pub async fn create(&self, request: &CreateTodoRequest) -> ClientResult<Todo> {
        let builder = self.request(Method::POST, None)?.json(request);
        let envelope: Envelope<Todo> = self.send(builder).await?;
        envelope.into_result()?.ok_or(ClientError::MissingData("create"))
    }

    /// `Ok(None)` when the server has no todo with this id.
    pub async fn get(&self, id: TodoId) -> ClientResult<Option<Todo>> {
        let envelope: Envelope<Option<Todo>> =
            self.send(self.request(Method::GET, Some(id))?).await?;
        Ok(envelope.into_result()?.flatten())
    }

    pub async fn update(&self, id: TodoId, request: &UpdateTodoRequest) -> ClientResult<Todo> {
        let builder = self.request(Method::PATCH, Some(id))?.json(request);
        let envelope: Envelope<Todo> = self.send(builder).await?;
        envelope.into_result()?.ok_or(ClientError::MissingData("update"))
    }

    pub async fn delete(&self, id: TodoId) -> ClientResult<()> {
        let envelope: Envelope<serde_json::Value> =
            self.send(self.request(Method::DELETE, Some(id))?).await?;
        envelope.into_result().map(|_| ())
    }

    fn request(&self, method: Method, id: Option<TodoId>) -> ClientResult<RequestBuilder> {
        let path = match id {
            Some(id) => format!("{TODOS_PATH}/{id}"),
            None => TODOS_PATH.to_string(),
        };
        let url = self
            .base_url
            .join(&path)
            .map_err(|err| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })?;
        Ok(self.http.request(method, url))
    }

    async fn send<T>(&self, builder: RequestBuilder) -> ClientResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| {
            tracing::error!(%status, error = %source, "todo api returned a non-envelope body");
            ClientError::InvalidResponse { status, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientError, TodoClient};
    use crate::{client::ClientConfig, response::Envelope};

    #[test]
    fn base_url_without_trailing_slash_keeps_its_path() {
        let client = TodoClient::new(ClientConfig::new("http://localhost:4000/proxy"))
            .expect("client builds");

        let url = client
            .request(reqwest::Method::GET, None)
            .expect("request builds")
            .build()
            .expect("request is valid")
            .url()
            .clone();
        assert_eq!(url.as_str(), "http://localhost:4000/proxy/api/todos");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = match TodoClient::new(ClientConfig::new("not a url")) {
            Ok(_) => panic!("base url should be rejected"),
            Err(err) => err,
        };
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn failure_envelope_becomes_api_error() {
        let envelope: Envelope<()> = serde_json::from_str(
            r#"{"success":false,"message":"Todo add failed","data":null,"error":"text is required"}"#,
        )
        .expect("envelope parses");

        match envelope.into_result() {
            Err(ClientError::Api { message, error }) => {
                assert_eq!(message, "Todo add failed");
                assert_eq!(error.as_deref(), Some("text is required"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
