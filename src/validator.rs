//! Shape checks for the decoded homework statuses payload

use serde_json::Value;
use tracing::error;

use crate::result::SchemaError;

/// Returns the `homeworks` elements untouched; their contents are checked by the interpreter.
pub fn validate(payload: &Value) -> Result<&[Value], SchemaError> {
    let Some(object) = payload.as_object() else {
        return fail(SchemaError::NotAMapping);
    };

    let Some(homeworks) = object.get("homeworks") else {
        return fail(SchemaError::MissingHomeworks);
    };

    match homeworks.as_array() {
        Some(list) => Ok(list.as_slice()),
        None => fail(SchemaError::HomeworksNotAList),
    }
}

fn fail<T>(err: SchemaError) -> Result<T, SchemaError> {
    error!(error = %err, "Review API response failed validation");
    Err(err)
}
