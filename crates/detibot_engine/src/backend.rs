use std::time::Duration;

use detibot_logging::{detibot_info, detibot_warn};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use url::Url;

use crate::payload::{
    content_type_for, FaqPayload, IngestResponse, PromptPayload, UrlSourcePayload,
    DESCRIPTION_PART, FAQ_SOURCE_PATH, FILE_PART, FILE_SOURCE_PATH, URL_SOURCE_PATH,
};
use crate::{BackendError, FailureKind, SourceRequest};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Root of the DetiBot API; endpoint paths are joined onto it.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` lets a stalled backend hang; the UI has no cancel either.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/detibot".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// REST surface the two screens talk to.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Uploads a source; succeeds only when the backend answers with its success marker.
    async fn submit_source(&self, source: &SourceRequest) -> Result<(), BackendError>;

    /// Sends one conversational turn and returns the bot's reply text.
    async fn send_prompt(
        &self,
        language: &str,
        prompt: &str,
        chat: &[String],
    ) -> Result<String, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let base = parse_base(&settings.base_url)?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|err| BackendError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    fn source_request(&self, source: &SourceRequest) -> Result<RequestBuilder, BackendError> {
        let request = match source {
            SourceRequest::File {
                file_name,
                bytes,
                description,
            } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type_for(file_name))
                    .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
                let form = Form::new()
                    .part(FILE_PART, part)
                    .text(DESCRIPTION_PART, description.clone());
                self.client
                    .post(self.endpoint(FILE_SOURCE_PATH)?)
                    .multipart(form)
            }
            SourceRequest::Url(url) => self
                .client
                .post(self.endpoint(URL_SOURCE_PATH)?)
                .json(&UrlSourcePayload::from(url)),
            SourceRequest::Faq { question, answer } => self
                .client
                .post(self.endpoint(FAQ_SOURCE_PATH)?)
                .json(&FaqPayload { question, answer }),
        };
        Ok(request)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn submit_source(&self, source: &SourceRequest) -> Result<(), BackendError> {
        detibot_info!("POST {} source to {}", source.kind(), self.base);
        let response = self
            .source_request(source)?
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response)?;

        let body: IngestResponse = response.json().await.map_err(map_decode_error)?;
        if body.is_success() {
            Ok(())
        } else {
            detibot_warn!("{} source rejected: {}", source.kind(), body.response);
            Err(BackendError::new(
                FailureKind::Rejected {
                    response: body.response.to_string(),
                },
                "backend did not confirm the source",
            ))
        }
    }

    async fn send_prompt(
        &self,
        language: &str,
        prompt: &str,
        chat: &[String],
    ) -> Result<String, BackendError> {
        let response = self
            .client
            .post(self.endpoint(language)?)
            .json(&PromptPayload { prompt, chat })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response)?;

        response.json::<String>().await.map_err(map_decode_error)
    }
}

/// Parses the API root, making sure relative joins append instead of replacing the last segment.
fn parse_base(raw: &str) -> Result<Url, BackendError> {
    let mut base = Url::parse(raw.trim())
        .map_err(|err| BackendError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(BackendError::new(
            FailureKind::InvalidEndpoint,
            format!("{raw} cannot be used as an API root"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}

fn map_decode_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    BackendError::new(FailureKind::Decode, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_without_trailing_slash_still_joins_below_it() {
        let base = parse_base("http://localhost:8000/detibot").unwrap();
        assert_eq!(
            base.join("en").unwrap().as_str(),
            "http://localhost:8000/detibot/en"
        );
    }

    #[test]
    fn invalid_base_is_reported() {
        let err = ReqwestBackend::new(BackendSettings {
            base_url: "not a url".into(),
            ..BackendSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);

        let err = parse_base("mailto:bot@example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);
    }
}
