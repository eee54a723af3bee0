mod add;
mod admin;
mod delete;
mod edit;
mod get;
mod image;
mod list;
mod statistics;

pub use add::*;
pub use admin::*;
pub use delete::*;
pub use edit::*;
pub use get::*;
pub use image::*;
pub use list::*;
pub use statistics::*;

use crate::errors::ReviewError;
use crate::models;
use actix_web::web;
use std::sync::Arc;

/// Principal set by the authentication middleware, 401 for anonymous callers.
pub(crate) fn authenticated(
    user: Option<web::ReqData<Arc<models::User>>>,
) -> Result<Arc<models::User>, ReviewError> {
    user.map(web::ReqData::into_inner)
        .ok_or(ReviewError::Unauthorized)
}
