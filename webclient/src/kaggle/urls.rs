use ::lazy_regex::{lazy_regex, Lazy, Regex};

use crate::{error::*, util, Url};

pub(super) static RE_COMPETITION_SLUG: Lazy<Regex> = lazy_regex!(r"^[a-z0-9][a-z0-9-]*$");

pub const DOMAIN: &str = "www.kaggle.com";
pub static API_BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("https://www.kaggle.com/api/v1/").unwrap());

pub fn validate_competition_slug(slug: &str) -> Result<()> {
    if RE_COMPETITION_SLUG.is_match(slug) {
        Ok(())
    } else {
        Err(Error::InvalidCompetitionSlug(slug.to_owned()))
    }
}

/// e.g. `https://www.kaggle.com/api/v1/competitions/submissions/list/titanic`
pub fn submission_list_api_url(base: &Url, competition: &str) -> Result<Url> {
    let path = format!("competitions/submissions/list/{}", competition);
    base.join(&path).map_err(|e| Error::InvalidSyntaxUrl {
        url: format!("{}{}", base, path),
        source: e,
    })
}

/// Human-facing page listing the user's submissions.
pub fn competition_submissions_page_url(competition: &str) -> String {
    format!("https://{}/competitions/{}/submissions", DOMAIN, competition)
}

/// Link to an individual submission if the provider gave one,
/// otherwise to the competition's submissions page.
pub fn submission_page_url(url_path: Option<&str>, competition: &str) -> String {
    match url_path.filter(|p| !p.trim().is_empty()) {
        Some(path) => util::complete_url(path, DOMAIN)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| competition_submissions_page_url(competition)),
        None => competition_submissions_page_url(competition),
    }
}
