use crate::config::Config;
use crate::store::Store;
use chrono::NaiveDateTime;
use std::fmt;

/// Everything a handler may touch while serving one command.
pub struct Context<'a> {
    pub store: &'a Store,
    pub config: &'a Config,
    /// Wall-clock time of the command; new orders take their time of day from it.
    pub now: NaiveDateTime,
}

/// What the user sees after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok(String),
    /// The input was refused before reaching the store.
    Warning(String),
    /// The store or a writer failed.
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok(text) => f.write_str(text),
            Reply::Warning(text) => write!(f, "Attention : {}", text),
            Reply::Error(text) => write!(f, "Erreur : {}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_prefixes() {
        assert_eq!(Reply::Ok("fait".into()).to_string(), "fait");
        assert_eq!(Reply::Warning("x".into()).to_string(), "Attention : x");
        assert_eq!(Reply::Error("y".into()).to_string(), "Erreur : y");
    }
}
