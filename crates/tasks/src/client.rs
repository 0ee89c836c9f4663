//! The [`TaskClient`] and its request helpers.

use std::time::Duration;

use dashboard_protocol::{Task, TaskInput};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

/// Characters escaped when a task id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Async client for the task service.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
}

impl TaskClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// Every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/v1/tasks", self.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            utf8_percent_encode(id, PATH_SEGMENT)
        )
    }

    /// Lists every task.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = self
            .send_json(self.http.request(Method::GET, self.collection_url()))
            .await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] with status `404` if no such task
    /// exists.
    #[instrument(skip(self))]
    pub async fn get_task(&self, id: &str) -> Result<Task> {
        self.send_json(self.http.request(Method::GET, self.task_url(id)))
            .await
    }

    /// Creates a task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_task(&self, input: &TaskInput) -> Result<Task> {
        let task: Task = self
            .send_json(self.http.request(Method::POST, self.collection_url()).json(input))
            .await?;
        debug!(id = %task.id, "created task");
        Ok(task)
    }

    /// Replaces a task's fields and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn update_task(&self, id: &str, input: &TaskInput) -> Result<Task> {
        self.send_json(self.http.request(Method::PUT, self.task_url(id)).json(input))
            .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.send(self.http.request(Method::DELETE, self.task_url(id)))
            .await?;
        debug!("deleted task");
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %body, "task service rejected request");
        Err(Error::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let bytes = self.send(request).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> TaskClient {
        TaskClient::new(base, Duration::from_secs(1)).expect("client")
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = client("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.collection_url(), "http://localhost:8080/api/v1/tasks");
    }

    #[test]
    fn task_ids_are_escaped() {
        let client = client("http://localhost:8080");
        assert_eq!(
            client.task_url("a b/c"),
            "http://localhost:8080/api/v1/tasks/a%20b%2Fc"
        );
        assert_eq!(client.task_url("42"), "http://localhost:8080/api/v1/tasks/42");
    }
}
