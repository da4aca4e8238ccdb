//! MineAdmin editions

use std::fmt;
use std::str::FromStr;

/// Language edition of MineAdmin to create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Php,
    Go,
    Js,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Php, Language::Go, Language::Js];

    /// Identifier used on the command line and in archive names
    pub fn id(&self) -> &'static str {
        match self {
            Language::Php => "php",
            Language::Go => "go",
            Language::Js => "js",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Php => "PHP",
            Language::Go => "Go",
            Language::Js => "JavaScript",
        }
    }

    /// The PHP edition is the flagship: tagged source archives, live release
    /// listing, platform patches and `.env` collection only apply to it
    pub fn is_primary(&self) -> bool {
        matches!(self, Language::Php)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "php" => Ok(Language::Php),
            "go" | "golang" => Ok(Language::Go),
            "js" | "javascript" => Ok(Language::Js),
            other => Err(format!("unknown language '{}' (expected php, go or js)", other)),
        }
    }
}
