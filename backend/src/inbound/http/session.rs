//! Bearer-token cookie extraction and redirect helpers.
//!
//! The identity provider hands the browser a signed token which travels in a
//! plain cookie. Handlers receive it through [`TokenCookie`] so they never
//! touch the raw request, and the mutation gate answers with the redirects
//! built here.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use futures_util::future::{Ready, ready};
use zeroize::Zeroizing;

/// Name of the cookie carrying the raw identity token.
pub const TOKEN_COOKIE: &str = "token";

/// Raw bearer token lifted from the request cookie, if any.
///
/// The token is secret material; it is wrapped in [`Zeroizing`] so the
/// buffer is scrubbed once the request ends.
pub struct TokenCookie(Option<Zeroizing<String>>);

impl TokenCookie {
    /// Raw token value, when the cookie was present.
    pub fn raw(&self) -> Option<&str> {
        self.0.as_deref().map(String::as_str)
    }
}

impl FromRequest for TokenCookie {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .cookie(TOKEN_COOKIE)
            .map(|cookie| Zeroizing::new(cookie.value().to_owned()));
        ready(Ok(Self(token)))
    }
}

/// `302 Found` to an application path.
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `302 Found` to the home surface, the mutation gate's answer to anonymous
/// requests.
pub fn redirect_home() -> HttpResponse {
    redirect_to("/")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, cookie::Cookie, test, web};

    async fn echo_token(token: TokenCookie) -> HttpResponse {
        match token.raw() {
            Some(raw) => HttpResponse::Ok().body(raw.to_owned()),
            None => HttpResponse::NoContent().finish(),
        }
    }

    #[actix_web::test]
    async fn extracts_the_token_cookie() {
        let app =
            test::init_service(App::new().route("/", web::get().to(echo_token))).await;

        let request = test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new(TOKEN_COOKIE, "abc123"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        assert_eq!(body, "abc123");
    }

    #[actix_web::test]
    async fn missing_cookie_yields_no_token() {
        let app =
            test::init_service(App::new().route("/", web::get().to(echo_token))).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[::core::prelude::v1::test]
    fn redirects_carry_the_location_header() {
        let response = redirect_home();
        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok());
        assert_eq!(location, Some("/"));
    }
}
