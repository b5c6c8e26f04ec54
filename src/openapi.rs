//! OpenAPI document for the students resource, served at `/openapi.json`.

use crate::error::ErrorBody;
use crate::handlers::students;
use crate::model::{Student, StudentInput};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Info API"),
    paths(
        students::create,
        students::list,
        students::read,
        students::update,
        students::delete
    ),
    components(schemas(Student, StudentInput, ErrorBody)),
    tags((name = "students", description = "Student records CRUD"))
)]
pub struct ApiDoc;
