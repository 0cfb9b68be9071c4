use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Telegram chat the notifications are delivered to
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ChatId {
    value: i64,
}

impl ChatId {
    pub fn new(id: i64) -> Self {
        Self { value: id }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::str::FromStr for ChatId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ChatId::new)
    }
}

impl Serialize for ChatId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.value)
    }
}

impl<'de> Deserialize<'de> for ChatId {
    fn deserialize<D>(deserializer: D) -> Result<ChatId, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ChatIdVisitor;

        impl<'de> Visitor<'de> for ChatIdVisitor {
            type Value = ChatId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing a chat ID")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value
                    .parse()
                    .map_err(|_| E::custom(format!("invalid chat id: {value}")))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ChatId::new(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(ChatId::new)
                    .map_err(|_| E::custom(format!("chat id out of range: {value}")))
            }
        }

        deserializer.deserialize_any(ChatIdVisitor)
    }
}
