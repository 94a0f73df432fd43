use chrono::{DateTime, Duration, Utc};
use md5::{Digest, Md5};
use reqwest::header::{HeaderMap, SET_COOKIE};
use tracing::{debug, warn};

use super::OpenwhydClient;
use crate::{
    error::{OpenwhydError, Result},
    types::{AuthSession, RawLogin, SessionRecord},
};

impl OpenwhydClient {
    /// Exchanges email + password for a session credential.
    ///
    /// The password is sent as its hex md5 digest; the upstream compares it
    /// against its own stored digest, so the exact algorithm is an upstream
    /// compatibility requirement rather than a protection.
    ///
    /// On success the credential is persisted through the session store keyed
    /// by the returned account id, and an [`AuthSession`] is returned. Any
    /// upstream rejection, transport or parse failure surfaces as
    /// [`OpenwhydError::Auth`] and leaves the store untouched; only a failing
    /// store write surfaces as [`OpenwhydError::Store`].
    pub async fn login_with_email(&self, email: &str, password: &str) -> Result<AuthSession> {
        let form = vec![
            ("action", "login".to_string()),
            ("ajax", "true".to_string()),
            ("email", email.to_string()),
            ("md5", password_digest(password)),
            ("includeUser", "true".to_string()),
        ];

        self.login("/login", form).await
    }

    /// Exchanges a Facebook user id and access token for a session
    /// credential via the upstream's federated login endpoint. Same failure
    /// and persistence behavior as [`OpenwhydClient::login_with_email`].
    pub async fn login_with_facebook(
        &self,
        fb_uid: &str,
        fb_access_token: &str,
    ) -> Result<AuthSession> {
        let form = vec![
            ("ajax", "true".to_string()),
            ("fbUid", fb_uid.to_string()),
            ("fbAccessToken", fb_access_token.to_string()),
            ("includeUser", "true".to_string()),
        ];

        self.login("/facebookLogin", form).await
    }

    async fn login(&self, path: &str, form: Vec<(&'static str, String)>) -> Result<AuthSession> {
        let response = match self.http().post_form(path, &form, None).await {
            Ok(response) => response,
            Err(e) => {
                warn!("login request failed: {e}");
                return Err(OpenwhydError::Auth(e.to_string()));
            }
        };

        // The credential lives in the response headers, not the body.
        let raw_cookies = collect_set_cookies(response.headers());
        let status = response.status();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("login response unreadable: {e}");
                return Err(OpenwhydError::Auth(e.to_string()));
            }
        };

        let login: RawLogin = match serde_json::from_str(&body) {
            Ok(login) => login,
            Err(e) => {
                warn!("login response unparsable: {e}");
                return Err(OpenwhydError::Auth(format!("unparsable login response: {e}")));
            }
        };

        if !status.is_success() {
            warn!("login rejected with status {status}");
            return Err(OpenwhydError::Auth(format!("login rejected: {status}")));
        }
        if let Some(error) = login.error {
            warn!("login rejected by upstream: {error}");
            return Err(OpenwhydError::Auth(error));
        }
        if login.id.is_empty() {
            return Err(OpenwhydError::Auth("login response carried no account id".into()));
        }

        let cookie = cookie_header(&raw_cookies);
        if cookie.is_empty() {
            return Err(OpenwhydError::Auth("login response carried no session cookie".into()));
        }

        let now = Utc::now();
        let record = SessionRecord {
            cookie: cookie.clone(),
            created_at: now,
            expires_at: cookie_expiry(&raw_cookies, now),
        };
        self.store().set(&login.id, record).await?;

        debug!("login succeeded for account {}", login.id);
        Ok(AuthSession {
            user_id: login.id,
            name: login.name,
            image_url: login.img,
            cookie,
        })
    }
}

fn password_digest(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}

fn collect_set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Reduces raw `Set-Cookie` values to the `name=value` pairs a `Cookie`
/// request header carries.
fn cookie_header(raw_cookies: &[String]) -> String {
    raw_cookies
        .iter()
        .filter_map(|cookie| cookie.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Extracts an expiry from `Max-Age` or `Expires` cookie attributes when the
/// upstream provides one.
fn cookie_expiry(raw_cookies: &[String], now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    for cookie in raw_cookies {
        for attribute in cookie.split(';').skip(1) {
            let mut parts = attribute.splitn(2, '=');
            let key = parts.next().unwrap_or("").trim();
            let value = parts.next().unwrap_or("").trim();

            if key.eq_ignore_ascii_case("max-age") {
                if let Ok(seconds) = value.parse::<i64>() {
                    return Some(now + Duration::seconds(seconds));
                }
            }
            if key.eq_ignore_ascii_case("expires") {
                if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
                    return Some(parsed.with_timezone(&Utc));
                }
            }
        }
    }
    None
}
