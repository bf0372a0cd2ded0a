//! Editable list of "useful links" appended to the generated description.

use uuid::Uuid;

/// Stable identity of a link entry. Assigned on creation, kept across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub Uuid);

impl LinkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsefulLink {
    pub id: LinkId,
    pub title: String,
    pub url: String,
}

impl UsefulLink {
    pub fn empty() -> Self {
        Self {
            id: LinkId::new(),
            title: String::new(),
            url: String::new(),
        }
    }

    /// Whether both halves are filled in. Incomplete entries never reach the service.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }

    pub fn field(&self, field: LinkField) -> &str {
        match field {
            LinkField::Title => &self.title,
            LinkField::Url => &self.url,
        }
    }

    pub fn field_mut(&mut self, field: LinkField) -> &mut String {
        match field {
            LinkField::Title => &mut self.title,
            LinkField::Url => &mut self.url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkField {
    Title,
    Url,
}

/// Ordered link entries. Never empty: the last remaining entry cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkList {
    links: Vec<UsefulLink>,
}

impl LinkList {
    /// A list holding a single empty entry, as shown when the editor mounts.
    pub fn new() -> Self {
        Self {
            links: vec![UsefulLink::empty()],
        }
    }

    /// Append an empty entry and return its id.
    pub fn add(&mut self) -> LinkId {
        let link = UsefulLink::empty();
        let id = link.id;
        self.links.push(link);
        id
    }

    /// Remove the entry with `id`. Silently ignored for the sole remaining
    /// entry or an unknown id. Returns whether an entry was removed.
    pub fn remove(&mut self, id: LinkId) -> bool {
        if self.links.len() <= 1 {
            return false;
        }
        let before = self.links.len();
        self.links.retain(|link| link.id != id);
        before != self.links.len()
    }

    /// Replace one field of the entry with `id`. No-op if the id is unknown.
    pub fn update(&mut self, id: LinkId, field: LinkField, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(link) => {
                *link.field_mut(field) = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: LinkId) -> Option<&UsefulLink> {
        self.links.iter().find(|link| link.id == id)
    }

    pub fn get_mut(&mut self, id: LinkId) -> Option<&mut UsefulLink> {
        self.links.iter_mut().find(|link| link.id == id)
    }

    pub fn can_remove(&self) -> bool {
        self.links.len() > 1
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UsefulLink> {
        self.links.iter()
    }

    pub fn as_slice(&self) -> &[UsefulLink] {
        &self.links
    }
}

impl Default for LinkList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a LinkList {
    type Item = &'a UsefulLink;
    type IntoIter = std::slice::Iter<'a, UsefulLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
