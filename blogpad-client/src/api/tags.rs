use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Post,
    Comment,
    Auth,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagId {
    List,
    Id(String),
}

/// Cache tag. Queries provide tags, mutations invalidate them.
///
/// An invalidating tag without an id hits every provided tag of its kind; one
/// with an id only hits provided tags carrying the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub kind: TagKind,
    pub id: Option<TagId>,
}

impl Tag {
    pub fn kind(kind: TagKind) -> Self {
        Self { kind, id: None }
    }

    pub fn list(kind: TagKind) -> Self {
        Self {
            kind,
            id: Some(TagId::List),
        }
    }

    pub fn id(kind: TagKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(TagId::Id(id.into())),
        }
    }

    /// Whether invalidating `self` hits the `provided` tag
    pub fn matches(&self, provided: &Tag) -> bool {
        self.kind == provided.kind && (self.id.is_none() || self.id == provided.id)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            None => write!(f, "{:?}", self.kind),
            Some(TagId::List) => write!(f, "{:?}:LIST", self.kind),
            Some(TagId::Id(id)) => write!(f, "{:?}:{}", self.kind, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_kind_hits_every_tag_of_that_kind() {
        let bare = Tag::kind(TagKind::Post);
        assert!(bare.matches(&Tag::list(TagKind::Post)));
        assert!(bare.matches(&Tag::id(TagKind::Post, "7")));
        assert!(bare.matches(&bare));
        assert!(!bare.matches(&Tag::kind(TagKind::Comment)));
    }

    #[test]
    fn ids_must_agree() {
        let list = Tag::list(TagKind::Post);
        assert!(list.matches(&Tag::list(TagKind::Post)));
        assert!(!list.matches(&Tag::id(TagKind::Post, "7")));
        assert!(!Tag::id(TagKind::Post, "7").matches(&Tag::id(TagKind::Post, "8")));
        assert!(!list.matches(&Tag::kind(TagKind::Post)));
    }

    #[test]
    fn display() {
        assert_eq!(Tag::kind(TagKind::Auth).to_string(), "Auth");
        assert_eq!(Tag::list(TagKind::Post).to_string(), "Post:LIST");
        assert_eq!(Tag::id(TagKind::Comment, "c1").to_string(), "Comment:c1");
    }
}
