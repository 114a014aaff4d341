use crate::transport::{DumpBody, DumpResponse, DumpSource, TransportError};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::{Client, StatusCode};
use std::io;
use tokio::io::BufReader;
use tokio_util::io::StreamReader;
use url::Url;

/// Read buffer for dump bodies. Large enough that a single read usually
/// pulls many lines off the socket.
const DUMP_READ_BUFFER: usize = 4 * 1024 * 1024;

/// Historical dump over a plain HTTP response body.
pub struct HttpDumpSource {
    client: Client,
    logs_url: Url,
}

impl HttpDumpSource {
    pub fn new(client: Client, logs_url: &str) -> Result<Self, TransportError> {
        let logs_url = Url::parse(logs_url).map_err(|e| TransportError::InvalidUrl {
            url: logs_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { client, logs_url })
    }

    pub fn dump_url(&self, lines: usize, filter: Option<&str>) -> Url {
        let mut url = self.logs_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("n", &lines.to_string());
            if let Some(filter) = filter.filter(|f| !f.is_empty()) {
                query.append_pair("filter", filter);
            }
        }
        url
    }
}

#[async_trait]
impl DumpSource for HttpDumpSource {
    async fn open_dump(
        &self,
        lines: usize,
        filter: Option<&str>,
    ) -> Result<DumpResponse, TransportError> {
        let url = self.dump_url(lines, filter);
        tracing::debug!(%url, lines, "requesting log dump");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::connect(url.as_str(), e))?;

        match response.status() {
            StatusCode::NO_CONTENT => return Ok(DumpResponse::NoContent),
            StatusCode::NOT_FOUND => return Ok(DumpResponse::NotFound),
            status if !status.is_success() => {
                return Err(TransportError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let body = response.bytes_stream().map_err(body_error);
        let reader: DumpBody = Box::new(BufReader::with_capacity(
            DUMP_READ_BUFFER,
            StreamReader::new(Box::pin(body)),
        ));

        Ok(DumpResponse::Body(reader))
    }
}

// A body that breaks off mid-transfer is the remote hanging up.
fn body_error(err: reqwest::Error) -> io::Error {
    if err.is_body() {
        io::Error::new(io::ErrorKind::UnexpectedEof, err)
    } else {
        io::Error::other(err)
    }
}
