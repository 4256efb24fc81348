use std::ops::Deref;

use serde::Deserialize;

/// A duration in the form `1d 2h 3m 4s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("Invalid duration"))
    }
}

fn parse(s: &str) -> Option<std::time::Duration> {
    s.split_whitespace().try_fold(std::time::Duration::ZERO, |out, part| {
        let (value, unit) = part.split_at(part.find(|c: char| !c.is_ascii_digit())?);
        let value = value.parse::<u64>().ok()?;
        let seconds = match unit {
            "s" => Some(value),
            "m" => value.checked_mul(60),
            "h" => value.checked_mul(60 * 60),
            "d" => value.checked_mul(24 * 60 * 60),
            _ => None,
        }?;
        out.checked_add(std::time::Duration::from_secs(seconds))
    })
}
