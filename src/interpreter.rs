//! Decides whether the tracked submission changed status since the last cycle

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    domain::{HomeworkStatus, Submission},
    result::SchemaError,
    state::PollState,
};

/// Only the first submission is tracked. Changes are detected on the status
/// alone, so a different submission reporting the previously seen status
/// counts as unchanged.
pub fn interpret(
    submissions: &[Value],
    state: &mut PollState,
) -> Result<Option<String>, SchemaError> {
    let first = submissions.first().ok_or_else(|| fail(SchemaError::EmptyList))?;
    let submission = parse_submission(first)?;

    if state.last_seen_status == Some(submission.status) {
        debug!(
            homework = %submission.name,
            status = %submission.status,
            "Homework status unchanged"
        );
        return Ok(None);
    }

    info!(
        homework = %submission.name,
        previous = ?state.last_seen_status,
        status = %submission.status,
        "Homework status changed"
    );
    state.last_seen_status = Some(submission.status);
    Ok(Some(submission.status_message()))
}

/// Extract name and status from one `homeworks` element
pub fn parse_submission(homework: &Value) -> Result<Submission, SchemaError> {
    let name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or_else(|| fail(SchemaError::MissingName))?;

    let raw_status = homework.get("status");
    let status = raw_status
        .and_then(|raw| HomeworkStatus::deserialize(raw).ok())
        .ok_or_else(|| {
            let shown = match raw_status {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "null".to_string(),
            };
            fail(SchemaError::UnknownStatus(shown))
        })?;

    Ok(Submission { name: name.into(), status })
}

fn fail(err: SchemaError) -> SchemaError {
    error!(error = %err, "Unexpected homework entry");
    err
}
