//! In-memory display surface the poller writes into.
//!
//! A [`Document`] holds a fixed set of named regions. Looking up a region
//! yields an optional handle; writes through a missing handle are dropped, so
//! a document built for one markup contract can be fed by a renderer that
//! targets regions it does not have.

use crate::markup::MarkupContract;

/// One visible entry in a list-style region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    /// Presentation hint carried over from the page markup (e.g. CSS classes).
    pub class: Option<&'static str>,
}

impl Item {
    pub fn new(text: impl Into<String>, class: Option<&'static str>) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegionContent {
    /// Never written.
    #[default]
    Empty,
    Text(String),
    Items(Vec<Item>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    regions: Vec<(String, RegionContent)>,
    revision: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new();
        for id in ids {
            doc.insert_region(id);
        }
        doc
    }

    /// Document holding exactly the regions `contract` renders into.
    pub fn for_contract(contract: MarkupContract) -> Self {
        Self::with_regions(contract.regions().ids())
    }

    /// Adds an empty region. No-op if `id` already exists.
    pub fn insert_region(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.contains(&id) {
            self.regions.push((id, RegionContent::Empty));
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.regions.iter().any(|(rid, _)| rid == id)
    }

    /// Writable handle to region `id`, `None` when the document has no such region.
    pub fn region(&mut self, id: &str) -> Option<RegionMut<'_>> {
        let Self { regions, revision } = self;
        regions
            .iter_mut()
            .find(|(rid, _)| rid == id)
            .map(|(_, content)| RegionMut { content, revision })
    }

    pub fn content(&self, id: &str) -> Option<&RegionContent> {
        self.regions
            .iter()
            .find(|(rid, _)| rid == id)
            .map(|(_, content)| content)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.content(id)? {
            RegionContent::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn items(&self, id: &str) -> Option<&[Item]> {
        match self.content(id)? {
            RegionContent::Items(items) => Some(items),
            _ => None,
        }
    }

    /// Regions in insertion order.
    pub fn regions(&self) -> impl Iterator<Item = (&str, &RegionContent)> {
        self.regions.iter().map(|(id, c)| (id.as_str(), c))
    }

    /// Incremented on every write that changes visible content.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

pub struct RegionMut<'a> {
    content: &'a mut RegionContent,
    revision: &'a mut u64,
}

impl RegionMut<'_> {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.replace(RegionContent::Text(text.into()));
    }

    /// Replaces the region's children wholesale.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.replace(RegionContent::Items(items));
    }

    fn replace(&mut self, next: RegionContent) {
        if *self.content != next {
            *self.content = next;
            *self.revision += 1;
        }
    }
}

/// Writes through an optional region handle; absent regions swallow the write.
pub trait RegionSink {
    fn set_text(self, text: impl Into<String>);
    fn set_items(self, items: Vec<Item>);
}

impl RegionSink for Option<RegionMut<'_>> {
    fn set_text(self, text: impl Into<String>) {
        if let Some(mut region) = self {
            region.set_text(text);
        }
    }

    fn set_items(self, items: Vec<Item>) {
        if let Some(mut region) = self {
            region.set_items(items);
        }
    }
}
