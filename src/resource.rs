//! Content resources served by the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A content collection and where it is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Discussions,
    Productivity,
    Tools,
    Tutorials,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Discussions,
        Resource::Productivity,
        Resource::Tools,
        Resource::Tutorials,
    ];

    /// Collection name, also the key used in seed files
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Discussions => "discussions",
            Resource::Productivity => "productivity",
            Resource::Tools => "tools",
            Resource::Tutorials => "tutorials",
        }
    }

    /// HTTP mount point
    pub fn mount_path(&self) -> &'static str {
        match self {
            Resource::Discussions => "/api/community/discussions",
            Resource::Productivity => "/api/productivity",
            Resource::Tools => "/api/tools",
            Resource::Tutorials => "/api/tutorials",
        }
    }

    /// Singular label used in not-found messages
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Discussions => "Discussion",
            Resource::Productivity => "Productivity hack",
            Resource::Tools => "Tool",
            Resource::Tutorials => "Tutorial",
        }
    }

    /// Whether fetching by id counts as a view. Slug lookups always do.
    pub fn counts_views_by_id(&self) -> bool {
        matches!(self, Resource::Discussions)
    }

    /// Whether the resource exposes a `/featured` shelf
    pub fn has_featured(&self) -> bool {
        !matches!(self, Resource::Discussions)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown resource '{}'", s))
    }
}
