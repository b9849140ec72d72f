use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};

use super::{ApiRequest, Body, Method, RawResponse, Transport};
use crate::error::ApiError;

/// Browser `fetch` through gloo-net.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v)));
        }

        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = with_body(builder, request.body)?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}

fn with_body(builder: RequestBuilder, body: Option<Body>) -> Result<Request, ApiError> {
    match body {
        None => Ok(builder.build()?),
        Some(Body::Json(value)) => Ok(builder.json(&value)?),
        Some(Body::Multipart { field, file }) => {
            let form = web_sys::FormData::new()
                .map_err(|err| ApiError::Transport(format!("FormData: {:?}", err)))?;
            form.append_with_blob(field, &file)
                .map_err(|err| ApiError::Transport(format!("FormData append: {:?}", err)))?;
            // The browser fills in the multipart boundary header itself.
            Ok(builder.body(form)?)
        }
    }
}
