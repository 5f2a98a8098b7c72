//! Route groups and namespace resolution.
//!
//! # Design Decisions
//! - The set of groups is closed; names come from one exhaustive table
//! - Root has no mount segment; every other group mounts at `/<name>`

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Named mount-path segment grouping related routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Root,
    V1,
    V2,
    V3,
    Dev,
    Api,
    Docs,
}

impl Group {
    pub const ALL: [Group; 7] = [
        Group::Root,
        Group::V1,
        Group::V2,
        Group::V3,
        Group::Dev,
        Group::Api,
        Group::Docs,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Group::Root => "root",
            Group::V1 => "v1",
            Group::V2 => "v2",
            Group::V3 => "v3",
            Group::Dev => "dev",
            Group::Api => "api",
            Group::Docs => "docs",
        }
    }

    /// `/<name>` for every group except root.
    pub fn mount_path(self) -> Option<String> {
        match self {
            Group::Root => None,
            group => Some(format!("/{}", group.name())),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route group `{0}`")]
pub struct UnknownGroup(pub String);

impl FromStr for Group {
    type Err = UnknownGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Group::ALL
            .into_iter()
            .find(|group| group.name() == s)
            .ok_or_else(|| UnknownGroup(s.to_string()))
    }
}

/// A routing scope bindings are installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// The server's top-level router.
    TopLevel,
    /// A sub-router mounted at the group's path.
    Grouped(Group),
}

impl Namespace {
    /// Root resolves to the top level; any other group to its own scope.
    pub fn resolve(group: Group) -> Self {
        match group {
            Group::Root => Namespace::TopLevel,
            group => Namespace::Grouped(group),
        }
    }

    pub fn group(self) -> Group {
        match self {
            Namespace::TopLevel => Group::Root,
            Namespace::Grouped(group) => group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_fixed() {
        let names: Vec<&str> = Group::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(names, ["root", "v1", "v2", "v3", "dev", "api", "docs"]);
    }

    #[test]
    fn mount_paths() {
        assert_eq!(Group::Root.mount_path(), None);
        assert_eq!(Group::V1.mount_path().as_deref(), Some("/v1"));
        assert_eq!(Group::Docs.mount_path().as_deref(), Some("/docs"));
    }

    #[test]
    fn parses_canonical_names() {
        for group in Group::ALL {
            assert_eq!(group.to_string().parse::<Group>(), Ok(group));
        }
        assert_eq!("V1".parse::<Group>(), Err(UnknownGroup("V1".into())));
    }

    #[test]
    fn resolve_root_to_top_level() {
        assert_eq!(Namespace::resolve(Group::Root), Namespace::TopLevel);
        assert_eq!(Namespace::resolve(Group::Dev), Namespace::Grouped(Group::Dev));
        assert_eq!(Namespace::resolve(Group::Api).group(), Group::Api);
    }
}
