use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{EmsError, Result};
use crate::types::{Employee, EmployeeFields};

/// Operations on the remote employee collection.
///
/// Any transport failure or non-2xx status comes back as an error; nothing is
/// retried.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>>;
    async fn get(&self, id: i64) -> Result<Employee>;
    async fn create(&self, fields: &EmployeeFields) -> Result<Employee>;
    async fn update(&self, id: i64, fields: &EmployeeFields) -> Result<Employee>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct EmployeeClient {
    http: Client,
    base: Url,
}

impl EmployeeClient {
    /// `base` is the collection URL, e.g. `http://localhost:8080/api/employees`.
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
        }
    }

    fn item_url(&self, id: i64) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| EmsError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty().push(&id.to_string());
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(EmsError::Api {
                status: status.as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl EmployeeDirectory for EmployeeClient {
    async fn list(&self) -> Result<Vec<Employee>> {
        tracing::debug!(url = %self.base, "GET employees");
        self.send_json(self.http.get(self.base.clone())).await
    }

    async fn get(&self, id: i64) -> Result<Employee> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "GET employee");
        self.send_json(self.http.get(url)).await
    }

    async fn create(&self, fields: &EmployeeFields) -> Result<Employee> {
        tracing::debug!(url = %self.base, "POST employee");
        self.send_json(self.http.post(self.base.clone()).json(fields))
            .await
    }

    async fn update(&self, id: i64, fields: &EmployeeFields) -> Result<Employee> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "PUT employee");
        self.send_json(self.http.put(url).json(fields)).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "DELETE employee");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}
