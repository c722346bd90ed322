//! Session cookie handling and the route guard built on top of it.

mod cookie;
mod middleware;

pub(crate) use cookie::{
    SESSION_COOKIE, clear_session_cookie, session_user, set_session_cookie,
};
pub(crate) use middleware::{GuardState, session_guard, session_guard_hx};
