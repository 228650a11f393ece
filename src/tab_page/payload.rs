use crate::commands::InsertSide;
use crate::types::{TabId, TabKey};

use super::frames::TabFrame;

/// Drag data type under which a dragged tab travels.
pub const TAB_DRAG_TYPE: &str = "application/x-shell-tab";

/// What a tab drag source puts on the drag: enough to move and, if needed, unpin the tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DragTabPayload {
    pub key: TabKey,
    /// The tab was dragged out of the pinned area.
    pub pinned_location: bool,
    pub tab_id: TabId,
}

impl DragTabPayload {
    pub fn for_frame(frame: &TabFrame) -> Self {
        Self {
            key: frame.key,
            pinned_location: frame.pinned,
            tab_id: frame.tab_id,
        }
    }
}

/// Where the current tab drag started.
///
/// At the store boundary this is a page index with `-1` standing for the pinned area, see
/// [`Self::from_raw`] / [`Self::to_raw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragOrigin {
    /// The pinned-tab area, which has no page index.
    Pinned,
    Page(usize),
}

impl DragOrigin {
    pub const PINNED_RAW: i32 = -1;

    /// `-1` is the pinned area, non-negative values are page indices, anything else is invalid.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            Self::PINNED_RAW => Some(Self::Pinned),
            page if page >= 0 => usize::try_from(page).ok().map(Self::Page),
            _ => None,
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            Self::Pinned => Self::PINNED_RAW,
            Self::Page(page) => i32::try_from(page).unwrap_or(i32::MAX),
        }
    }

    /// Which side of the target page's first tab a tab dragged from here lands on.
    ///
    /// Dragging out of the pinned area, within a page or towards an earlier page inserts after
    /// the anchor: the tabs between source and target have already shifted by one.
    /// Dragging towards a later page inserts before it.
    pub fn insert_side_for(self, target_page: usize) -> InsertSide {
        match self {
            Self::Pinned => InsertSide::After,
            Self::Page(source_page) if source_page >= target_page => InsertSide::After,
            Self::Page(_) => InsertSide::Before,
        }
    }
}

/// How the drop target would handle the dragged data, as shown by the cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Link,
    Move,
}

/// A typed drag data item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragData {
    Tab(DragTabPayload),
    Text(String),
}

/// The data carried by one drag gesture plus the drop target's feedback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataTransfer {
    pub drop_effect: DropEffect,
    default_prevented: bool,
    items: Vec<(String, DragData)>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transfer carrying a dragged tab under [`TAB_DRAG_TYPE`].
    pub fn with_tab(payload: DragTabPayload) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(TAB_DRAG_TYPE, DragData::Tab(payload));
        transfer
    }

    /// Store `data` under `kind`, replacing earlier data of the same kind.
    pub fn set_data(&mut self, kind: impl Into<String>, data: DragData) {
        let kind = kind.into();
        if let Some((_, slot)) = self.items.iter_mut().find(|(k, _)| *k == kind) {
            *slot = data;
        } else {
            self.items.push((kind, data));
        }
    }

    pub fn data(&self, kind: &str) -> Option<&DragData> {
        self.items
            .iter()
            .find_map(|(k, data)| (k == kind).then_some(data))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(kind, _)| kind.as_str())
    }

    /// The dragged tab, if this transfer carries one.
    pub fn tab_payload(&self) -> Option<DragTabPayload> {
        match self.data(TAB_DRAG_TYPE)? {
            DragData::Tab(payload) => Some(*payload),
            DragData::Text(_) => None,
        }
    }

    /// Mark the drag as handled by the current target (accepts the drop).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_origin_round_trips_at_the_boundary() {
        assert_eq!(DragOrigin::from_raw(-1), Some(DragOrigin::Pinned));
        assert_eq!(DragOrigin::from_raw(3), Some(DragOrigin::Page(3)));
        assert_eq!(DragOrigin::from_raw(-2), None);
        assert_eq!(DragOrigin::Pinned.to_raw(), -1);
        assert_eq!(DragOrigin::Page(4).to_raw(), 4);
    }

    #[test]
    fn insert_side_rules() {
        assert_eq!(DragOrigin::Pinned.insert_side_for(0), InsertSide::After);
        assert_eq!(DragOrigin::Pinned.insert_side_for(2), InsertSide::After);
        assert_eq!(DragOrigin::Page(1).insert_side_for(1), InsertSide::After);
        assert_eq!(DragOrigin::Page(2).insert_side_for(0), InsertSide::After);
        assert_eq!(DragOrigin::Page(3).insert_side_for(1), InsertSide::After);
        assert_eq!(DragOrigin::Page(0).insert_side_for(2), InsertSide::Before);
    }

    #[test]
    fn tab_payload_only_reads_tab_data() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(TAB_DRAG_TYPE, DragData::Text("not a tab".to_owned()));
        assert_eq!(transfer.tab_payload(), None);

        let payload = DragTabPayload {
            key: TabKey(5),
            pinned_location: true,
            tab_id: TabId(50),
        };
        transfer.set_data(TAB_DRAG_TYPE, DragData::Tab(payload));
        assert_eq!(transfer.tab_payload(), Some(payload));
        assert_eq!(transfer.kinds().count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn payload_wire_shape() {
        let payload = DragTabPayload {
            key: TabKey(12),
            pinned_location: true,
            tab_id: TabId(99),
        };
        let json = serde_json::to_value(payload).expect("payload serializes");
        assert_eq!(
            json,
            serde_json::json!({ "key": 12, "pinnedLocation": true, "tabId": 99 })
        );

        let back: DragTabPayload = serde_json::from_value(json).expect("payload deserializes");
        assert_eq!(back, payload);
    }
}
