//! Handler modules for tutorlog-web.
//!
//! One handler per route; each performs at most one persistence write and
//! responds with a rendered page, a redirect, or a download.

pub mod api;
pub mod export;
pub mod learners;
pub mod notes;

use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::flash::{self, Notice};
use crate::AppState;

/// Redirect to `to` with a one-shot notice queued for the next render.
pub(crate) fn redirect_with_notice(state: &AppState, to: &str, notice: Notice) -> Response {
    let cookie = flash::set_cookie(&state.secret, &notice);
    ([(SET_COOKIE, cookie)], Redirect::to(to)).into_response()
}

/// Wrap a rendered page, clearing the flash cookie when the request carried
/// one — displayed or not, so tampered values do not linger.
pub(crate) fn rendered(html: String, had_notice_cookie: bool) -> Response {
    if had_notice_cookie {
        ([(SET_COOKIE, flash::clear_cookie())], Html(html)).into_response()
    } else {
        Html(html).into_response()
    }
}
