use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// One cache handed to several sessions on the same thread.
pub type SharedPrefetchCache = Rc<RefCell<PrefetchCache>>;

/// Sprite URLs already handed out for background loading.
///
/// Entries are never evicted, so the set grows for as long as the cache lives.
#[derive(Debug, Default)]
pub struct PrefetchCache {
    requested: HashSet<String>,
}

impl PrefetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedPrefetchCache {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Records `url`; true means this is the first sighting and a preload should start.
    pub fn touch(&mut self, url: &str) -> bool {
        if self.requested.contains(url) {
            return false;
        }
        self.requested.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.requested.contains(url)
    }

    pub fn len(&self) -> usize {
        self.requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }

    pub fn clear(&mut self) {
        self.requested.clear();
    }
}
