//! The `Student` record and its write payload.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    /// Assigned by the store, never reused.
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Fields a client may write. Used for both create and full-replacement update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentInput {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl StudentInput {
    /// Decode a request body with type coercion only. Unknown keys, including `id`, are ignored.
    pub fn from_json(value: Value) -> Result<Self, StoreError> {
        let mut map = match value {
            Value::Object(m) => m,
            _ => return Err(StoreError::Validation("body must be a JSON object".into())),
        };
        let name = required_string(&mut map, "name")?;
        let email = required_string(&mut map, "email")?;
        let age = required_int(&mut map, "age")?;
        Ok(StudentInput { name, email, age })
    }

    pub fn into_student(self, id: i32) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

fn required_string(map: &mut Map<String, Value>, field: &str) -> Result<String, StoreError> {
    match map.remove(field) {
        None | Some(Value::Null) => Err(StoreError::Validation(format!("{} is required", field))),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(StoreError::Validation(format!("{} must be a string", field))),
    }
}

fn required_int(map: &mut Map<String, Value>, field: &str) -> Result<i32, StoreError> {
    match map.remove(field) {
        None | Some(Value::Null) => Err(StoreError::Validation(format!("{} is required", field))),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| StoreError::Validation(format!("{} must be an integer", field))),
        Some(_) => Err(StoreError::Validation(format!("{} must be an integer", field))),
    }
}
