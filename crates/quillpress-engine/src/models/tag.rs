/// A resolved tag reference.
///
/// Tags are value-equal lookups: two tags built from the same name compare
/// equal, and a post's tag list may hold duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    url: String,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: format!("/tags/{name}"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
