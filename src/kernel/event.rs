use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the host can tell the core about the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// One server tick elapsed.
    Tick,
    /// The agent's own avatar changed animation.
    Animation(i32),
    Chat(ChatMessage),
    SkillExperience { skill: Skill, delta: i32 },
    /// Someone took damage; `source` is who the splat landed on.
    DamageSplat { source: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub category: ChatCategory,
}

impl ChatMessage {
    pub fn game(text: &str) -> Self {
        Self {
            text: text.to_string(),
            category: ChatCategory::Game,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatCategory {
    Game,
    Filtered,
    Public,
    Private,
    Clan,
}

impl ChatCategory {
    /// Only server-generated lines carry combat information.
    pub fn is_server(&self) -> bool {
        matches!(self, ChatCategory::Game | ChatCategory::Filtered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Attack,
    Strength,
    Defence,
    Ranged,
    Hitpoints,
    Prayer,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("empty feed line")]
    Empty,
    #[error("unknown event kind `{0}`")]
    UnknownKind(String),
    #[error("missing argument for `{0}`")]
    MissingArgument(&'static str),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("unknown chat category `{0}`")]
    UnknownCategory(String),
    #[error("unknown skill `{0}`")]
    UnknownSkill(String),
}

impl FromStr for ChatCategory {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "game" => Ok(ChatCategory::Game),
            "filtered" => Ok(ChatCategory::Filtered),
            "public" => Ok(ChatCategory::Public),
            "private" => Ok(ChatCategory::Private),
            "clan" => Ok(ChatCategory::Clan),
            other => Err(FeedError::UnknownCategory(other.to_string())),
        }
    }
}

impl FromStr for Skill {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "attack" => Ok(Skill::Attack),
            "strength" => Ok(Skill::Strength),
            "defence" | "defense" => Ok(Skill::Defence),
            "ranged" => Ok(Skill::Ranged),
            "hitpoints" => Ok(Skill::Hitpoints),
            "prayer" => Ok(Skill::Prayer),
            other => Err(FeedError::UnknownSkill(other.to_string())),
        }
    }
}

fn parse_number<T: FromStr>(raw: Option<&str>, arg: &'static str) -> Result<T, FeedError> {
    let raw = raw.ok_or(FeedError::MissingArgument(arg))?;
    raw.parse().map_err(|_| FeedError::InvalidNumber(raw.to_string()))
}

/// Line form used by the driver binary:
/// `tick`, `anim <id>`, `chat <category> <text...>`, `xp <skill> <delta>`, `splat <name>`.
impl FromStr for Event {
    type Err = FeedError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (kind, rest) = match line.split_once(char::is_whitespace) {
            Some((kind, rest)) => (kind, rest.trim()),
            None => (line, ""),
        };

        match kind {
            "" => Err(FeedError::Empty),
            "tick" => Ok(Event::Tick),
            "anim" => Ok(Event::Animation(parse_number(rest.split_whitespace().next(), "anim")?)),
            "chat" => {
                let (category, text) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(FeedError::MissingArgument("chat"))?;
                Ok(Event::Chat(ChatMessage {
                    text: text.trim().to_string(),
                    category: category.parse()?,
                }))
            }
            "xp" => {
                let mut parts = rest.split_whitespace();
                let skill = parts.next().ok_or(FeedError::MissingArgument("xp"))?.parse()?;
                let delta = parse_number(parts.next(), "xp")?;
                Ok(Event::SkillExperience { skill, delta })
            }
            "splat" => {
                if rest.is_empty() {
                    return Err(FeedError::MissingArgument("splat"));
                }
                Ok(Event::DamageSplat { source: rest.to_string() })
            }
            other => Err(FeedError::UnknownKind(other.to_string())),
        }
    }
}
