use std::{fmt::Display, time::Duration};

use serde::Serialize;

pub use ::reqwest::{Error, IntoUrl, Request, Response, StatusCode};

const USER_AGENT: &str = concat!("kwatch/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper of `reqwest::Client` which bounds every request by a timeout,
/// so that a stalled peer cannot desynchronize the polling cadence.
#[derive(Debug, Clone)]
pub struct Client {
    inner: ::reqwest::Client,
}

pub struct RequestBuilder {
    inner: ::reqwest::RequestBuilder,
    client: Client,
}

macro_rules! emit_request_fn {
    ($method:ident) => {
        pub fn $method(&self, u: impl IntoUrl) -> RequestBuilder {
            RequestBuilder::new(self.inner.$method(u), self.clone())
        }
    };
}

impl Client {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let inner = ::reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .gzip(true)
            .build()?;
        Ok(Self { inner })
    }

    emit_request_fn!(get);
    emit_request_fn!(post);

    pub(super) async fn execute_request(&self, req: Request) -> Result<Response, Error> {
        log::debug!("{} {}", req.method(), req.url());
        let resp = self.inner.execute(req).await?;
        log::debug!("=> {}", resp.status());
        Ok(resp)
    }
}

impl RequestBuilder {
    fn new(b: ::reqwest::RequestBuilder, client: Client) -> Self {
        Self { inner: b, client }
    }

    pub async fn send(self) -> Result<Response, Error> {
        let req = self.inner.build()?;
        self.client.execute_request(req).await
    }

    pub fn basic_auth<U, P>(mut self, username: U, password: Option<P>) -> Self
    where
        U: Display,
        P: Display,
    {
        self.inner = self.inner.basic_auth(username, password);
        self
    }

    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        self.inner = self.inner.query(query);
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
        self.inner = self.inner.json(json);
        self
    }
}
