//! The persisted session state: one private cookie holding the serialized
//! [SessionUser].

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::SessionUser};

/// The cookie key under which the session user is stored.
pub(crate) const SESSION_COOKIE: &str = "user";

/// How long a session cookie lasts before the browser drops it.
const SESSION_COOKIE_DURATION: Duration = Duration::days(30);

/// Store `user` as the session user, overwriting any previous session.
///
/// # Errors
///
/// Returns [Error::SessionEncode] if the user cannot be serialized. The jar
/// is returned unmodified in that case.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    user: &SessionUser,
) -> Result<PrivateCookieJar, Error> {
    let serialized =
        serde_json::to_string(user).map_err(|error| Error::SessionEncode(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((SESSION_COOKIE, serialized))
            .expires(OffsetDateTime::now_utc() + SESSION_COOKIE_DURATION)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true)
            .path("/"),
    ))
}

/// The current session user, if a well-formed one is stored.
///
/// Absent and malformed cookies both yield `None` so that a corrupted
/// session degrades to "logged out" instead of an error page.
pub(crate) fn session_user(jar: &PrivateCookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;

    match serde_json::from_str(cookie.value_trimmed()) {
        Ok(user) => Some(user),
        Err(error) => {
            tracing::warn!("Discarding malformed session cookie: {error}");
            None
        }
    }
}

/// Overwrite the session cookie with an expired tombstone, which deletes it
/// on the client side.
pub(crate) fn clear_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true)
            .path("/"),
    )
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::user::{Role, SessionUser};

    use super::{SESSION_COOKIE, clear_session_cookie, session_user, set_session_cookie};

    fn get_jar() -> PrivateCookieJar {
        let key = Key::from(&Sha512::digest("42"));
        PrivateCookieJar::new(key)
    }

    fn admin_user() -> SessionUser {
        SessionUser {
            username: "alice".to_owned(),
            role: Some(Role {
                role_name: "Admin".to_owned(),
            }),
        }
    }

    #[test]
    fn session_user_round_trips() {
        let jar = set_session_cookie(get_jar(), &admin_user()).unwrap();

        let got = session_user(&jar);

        assert_eq!(got, Some(admin_user()));
    }

    #[test]
    fn absent_cookie_yields_no_user() {
        assert_eq!(session_user(&get_jar()), None);
    }

    #[test]
    fn malformed_cookie_yields_no_user() {
        let jar = get_jar().add(Cookie::new(SESSION_COOKIE, "{not json"));

        assert_eq!(session_user(&jar), None);
    }

    #[test]
    fn clearing_the_session_expires_the_cookie() {
        let jar = set_session_cookie(get_jar(), &admin_user()).unwrap();

        let jar = clear_session_cookie(jar);
        let cookie = jar.get(SESSION_COOKIE).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(session_user(&jar), None);
    }

    #[test]
    fn setting_a_new_user_replaces_the_old_session() {
        let jar = set_session_cookie(get_jar(), &admin_user()).unwrap();
        let regular = SessionUser {
            username: "bob".to_owned(),
            role: None,
        };

        let jar = set_session_cookie(jar, &regular).unwrap();

        assert_eq!(session_user(&jar), Some(regular));
    }
}
