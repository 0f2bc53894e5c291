use std::{fmt::Display, result};

use endb_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, delete, get,
    http::{Cookie, CookieJar, Status},
    post, put,
    response::{self, Responder},
    routes, Route,
};

use super::guards::*;
use crate::{
    adapters::json::{self, from_json, to_json},
    web::sqlite,
};
use endb_application::prelude as flows;
use endb_core::usecases;

mod error;
mod favorites;
mod listings;
mod reviews;
mod search;
mod users;

pub use self::error::Error as ApiError;

#[cfg(test)]
pub mod tests;

type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   search   --- //
        search::get_search,
        search::post_search,
        // ---   listings   --- //
        listings::get_featured_listings,
        listings::get_listing,
        listings::post_listing,
        listings::put_listing,
        listings::delete_listing,
        // ---   reviews   --- //
        reviews::get_reviews,
        reviews::post_review,
        reviews::post_review_vote,
        // ---   favorites   --- //
        favorites::get_favorites,
        favorites::post_favorite,
        favorites::delete_favorite,
        // ---   users   --- //
        users::post_login,
        users::post_logout,
        users::post_user,
        users::get_current_user,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}
