use std::fmt;

use compact_str::CompactString;
use serde::Deserialize;

/// Review verdict reported by the homework API
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

/// A single tracked submission, decoded from the first element of `homeworks`
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: CompactString,
    pub status: HomeworkStatus,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Fixed sentence sent to the chat for this verdict
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Submission {
    pub fn status_message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: serde_json::Value) -> Option<HomeworkStatus> {
        HomeworkStatus::deserialize(raw).ok()
    }

    #[test]
    fn deserializes_only_documented_statuses() {
        use serde_json::json;

        assert_eq!(parse(json!("approved")), Some(HomeworkStatus::Approved));
        assert_eq!(parse(json!("reviewing")), Some(HomeworkStatus::Reviewing));
        assert_eq!(parse(json!("rejected")), Some(HomeworkStatus::Rejected));
        assert_eq!(parse(json!("Approved")), None);
        assert_eq!(parse(json!("unknown")), None);
        assert_eq!(parse(json!(1)), None);
    }

    #[test]
    fn status_message_embeds_name_and_verdict() {
        let submission = Submission {
            name: "hw1".into(),
            status: HomeworkStatus::Rejected,
        };
        assert_eq!(
            submission.status_message(),
            "Изменился статус проверки работы \"hw1\". Работа проверена: у ревьюера есть замечания."
        );
    }
}
