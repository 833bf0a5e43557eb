use std::future::{ready, Ready};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use actix_web::{
    cookie::{time, Cookie, SameSite},
    dev::Payload,
    web, FromRequest, HttpRequest,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::errors::ServerError;

pub const COOKIE_NAME: &str = "sticky_session";

/// Signing material and cookie policy shared by every request.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    secure: bool,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl: Duration, secure: bool) -> Self {
        SessionKeys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
            secure,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    csrf: String,
    exp: usize,
}

/// The visitor's session. It only carries the anti-forgery token and lives
/// in a signed cookie; a missing or unverifiable cookie yields a fresh one.
#[derive(Debug)]
pub struct Session {
    csrf: String,
    exp: usize,
    fresh: bool,
}

impl Session {
    pub fn issue(keys: &SessionKeys) -> Self {
        let exp = SystemTime::now()
            .checked_add(keys.ttl)
            .unwrap_or_else(SystemTime::now)
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as usize)
            .unwrap_or_default();

        Session {
            csrf: nanoid!(64),
            exp,
            fresh: true,
        }
    }

    pub fn restore(keys: &SessionKeys, token: &str) -> Option<Self> {
        match decode::<Claims>(token, &keys.decoding, &keys.validation) {
            Ok(data) => Some(Session {
                csrf: data.claims.csrf,
                exp: data.claims.exp,
                fresh: false,
            }),
            Err(e) => {
                log::debug!("discarding session cookie: {e}");
                None
            }
        }
    }

    pub fn csrf(&self) -> &str {
        &self.csrf
    }

    /// True when the session was created by this request and the cookie
    /// still has to be sent.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn verify(&self, submitted: Option<&str>) -> Result<(), ServerError> {
        let matches: bool = match submitted {
            Some(token) => self.csrf.as_bytes().ct_eq(token.as_bytes()).into(),
            None => false,
        };

        // a fresh session has never been rendered, so nothing can hold its token
        if matches && !self.fresh {
            Ok(())
        } else {
            log::warn!("rejected post with a missing or mismatched csrf token");
            Err(ServerError::InvalidCsrf)
        }
    }

    pub fn cookie(&self, keys: &SessionKeys) -> Result<Cookie<'static>, ServerError> {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                csrf: self.csrf.clone(),
                exp: self.exp,
            },
            &keys.encoding,
        )?;

        Ok(Cookie::build(COOKIE_NAME, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(keys.secure)
            .max_age(time::Duration::seconds(
                i64::try_from(keys.ttl.as_secs()).unwrap_or(i64::MAX),
            ))
            .finish())
    }
}

impl FromRequest for Session {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let keys = match req.app_data::<web::Data<SessionKeys>>() {
            Some(keys) => keys,
            None => {
                log::error!("session keys are not registered");
                return ready(Err(ServerError::EnvironmentError));
            }
        };

        let session = req
            .cookie(COOKIE_NAME)
            .and_then(|cookie| Session::restore(keys, cookie.value()))
            .unwrap_or_else(|| Session::issue(keys));

        ready(Ok(session))
    }
}
