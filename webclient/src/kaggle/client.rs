use ::async_trait::async_trait;
use ::std::time::Duration;
use reqwest::StatusCode;

use super::{urls::*, wire::RawSubmission};
use crate::{error::*, http, model::*, util};

pub struct KaggleClient {
    http: http::Client,
    credential: KaggleCredential,
    api_base: Url,
}

impl KaggleClient {
    pub fn new(credential: KaggleCredential, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: http::Client::new(timeout)?,
            credential,
            api_base: API_BASE_URL.clone(),
        })
    }

    /// Points the client at another API root (must end with `/`).
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn username(&self) -> &str {
        &self.credential.username
    }

    pub fn submission_list_url(&self, competition: &str) -> Result<Url> {
        validate_competition_slug(competition)?;
        submission_list_api_url(&self.api_base, competition)
    }
}

#[async_trait]
impl SubmissionSource for KaggleClient {
    async fn list_submissions(&self, competition: &str) -> Result<Vec<Submission>> {
        let url = self.submission_list_url(competition)?;
        let resp = self
            .http
            .get(url.clone())
            .basic_auth(&self.credential.username, Some(&self.credential.key))
            .query(&[("page", "1")])
            .send()
            .await?;

        match resp.status() {
            s if util::is_auth_rejection(s) => {
                return Err(Error::WrongCredential {
                    fields: "Kaggle username or key",
                    requested_url: url.to_string(),
                })
            }
            StatusCode::NOT_FOUND => {
                return Err(Error::NoSuchCompetition {
                    competition: competition.to_owned(),
                })
            }
            _ => (),
        }
        let resp = util::ensure_success(resp, &url).await?;
        let raws: Vec<RawSubmission> = util::read_json(resp).await?;

        let total = raws.len();
        let subs: Vec<_> = raws
            .into_iter()
            .filter_map(RawSubmission::into_submission)
            .collect();
        if subs.len() < total {
            log::warn!(
                "Skipped {} submission record(s) without a usable ref",
                total - subs.len()
            );
        }
        Ok(subs)
    }
}
