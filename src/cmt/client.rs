// CMT API HTTP client.
// Handles session-cookie authentication and request/response processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN},
};
use serde_json::json;

use crate::error::{CmtError, Result};

pub const CMT_BASE: &str = "https://cmt3.research.microsoft.com";
const LOGIN_ENDPOINT: &str = "/api/odata/Users/Login?ReturnUrl=%2F";

/// CMT API client holding the authenticated session cookie jar.
pub struct CmtClient {
    client: Client,
}

impl CmtClient {
    /// Build the underlying HTTP client with the fixed OData headers and a
    /// cookie store for the session cookie.
    fn build() -> Result<Client> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json;odata.metadata=full"),
        );
        headers.insert("OData-MaxVersion", HeaderValue::from_static("4.0"));
        headers.insert("OData-Version", HeaderValue::from_static("4.0"));
        headers.insert(ORIGIN, HeaderValue::from_static(CMT_BASE));
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(CmtError::Api)?;

        Ok(client)
    }

    /// Log in with the given credentials and return an authenticated client.
    ///
    /// Any non-200 response is fatal; there is no retry.
    pub async fn login(username: &str, password: &str) -> Result<Self> {
        let client = Self::build()?;

        let body = json!({
            "Request": {
                "Email": username,
                "Password": password,
            }
        });

        let response = client
            .post(format!("{}{}", CMT_BASE, LOGIN_ENDPOINT))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(CmtError::Api)?;

        if response.status() != StatusCode::OK {
            return Err(CmtError::Authentication {
                status: response.status().as_u16(),
            });
        }

        Ok(Self { client })
    }

    /// Make a GET request against a CMT endpoint path.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", CMT_BASE, endpoint);
        let response = self.client.get(&url).send().await.map_err(CmtError::Api)?;
        self.check_response(response).await
    }

    /// Make a POST request with a JSON body against a CMT endpoint path.
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", CMT_BASE, endpoint);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(CmtError::Api)?;
        self.check_response(response).await
    }

    /// Download a binary resource from a server-issued relative link.
    pub async fn get_bytes(&self, relative_link: &str) -> Result<Vec<u8>> {
        let response = self.get(relative_link).await?;
        let bytes = response.bytes().await.map_err(CmtError::Api)?;
        Ok(bytes.to_vec())
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CmtError::Authentication {
                status: response.status().as_u16(),
            }),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(CmtError::NotFound(url))
            }
            status => Err(CmtError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
