use itertools::Itertools as _;

use crate::types::{TabId, TabKey};

use super::payload::DragOrigin;

/// The per-tab state a tab page needs to know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabFrame {
    pub key: TabKey,
    pub tab_id: TabId,
    pub pinned: bool,
    pub audio_playback_active: bool,
    pub audio_muted: bool,
}

impl TabFrame {
    pub fn new(key: TabKey, tab_id: TabId) -> Self {
        Self {
            key,
            tab_id,
            pinned: false,
            audio_playback_active: false,
            audio_muted: false,
        }
    }

    #[must_use]
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    #[must_use]
    pub fn with_audio(mut self, playing: bool, muted: bool) -> Self {
        self.audio_playback_active = playing;
        self.audio_muted = muted;
        self
    }

    /// Playing sound the user can actually hear.
    pub fn is_audible(&self) -> bool {
        self.audio_playback_active && !self.audio_muted
    }
}

/// The tabs of one page, in strip order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabPageFrames {
    frames: Vec<TabFrame>,
}

impl TabPageFrames {
    pub fn new(frames: Vec<TabFrame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The first tab of the page; dropped tabs are placed relative to it.
    pub fn first(&self) -> Option<&TabFrame> {
        self.frames.first()
    }

    pub fn get(&self, index: usize) -> Option<&TabFrame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TabFrame> {
        self.frames.iter()
    }

    pub fn audio_playback_active(&self) -> bool {
        self.frames.iter().any(TabFrame::is_audible)
    }
}

impl FromIterator<TabFrame> for TabPageFrames {
    fn from_iter<T: IntoIterator<Item = TabFrame>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TabPageFrames {
    type Item = &'a TabFrame;
    type IntoIter = std::slice::Iter<'a, TabFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A tab strip split into fixed-size pages, with pinned tabs kept apart.
#[derive(Clone, Debug, Default)]
pub struct TabPages {
    pinned: Vec<TabFrame>,
    pages: Vec<TabPageFrames>,
    page_of: ahash::HashMap<TabKey, usize>,
}

impl TabPages {
    /// Split `frames` (strip order) into pages of at most `tabs_per_page` unpinned tabs.
    ///
    /// A page only exists once a tab occupies it, so no page is ever empty.
    pub fn paginate(frames: impl IntoIterator<Item = TabFrame>, tabs_per_page: usize) -> Self {
        let tabs_per_page = tabs_per_page.max(1);
        let (pinned, unpinned): (Vec<TabFrame>, Vec<TabFrame>) =
            frames.into_iter().partition(|frame| frame.pinned);

        let chunks = unpinned.into_iter().chunks(tabs_per_page);
        let pages: Vec<TabPageFrames> = chunks.into_iter().map(|chunk| chunk.collect()).collect();

        let page_of = pages
            .iter()
            .enumerate()
            .flat_map(|(index, page)| page.iter().map(move |frame| (frame.key, index)))
            .collect();

        Self {
            pinned,
            pages,
            page_of,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&TabPageFrames> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> impl Iterator<Item = (usize, &TabPageFrames)> {
        self.pages.iter().enumerate()
    }

    pub fn pinned(&self) -> &[TabFrame] {
        &self.pinned
    }

    pub fn page_index_of(&self, key: TabKey) -> Option<usize> {
        self.page_of.get(&key).copied()
    }

    /// The drag-origin hint to record when a drag of `key` starts.
    pub fn drag_origin_of(&self, key: TabKey) -> Option<DragOrigin> {
        if self.pinned.iter().any(|frame| frame.key == key) {
            return Some(DragOrigin::Pinned);
        }
        self.page_index_of(key).map(DragOrigin::Page)
    }
}
