use egui::Vec2;

use crate::placement::AnchoredRect;

/// What the host store knows about the popup window.
///
/// An empty `src` means there is no popup; every other field is ignored in that case.
/// `width`/`height` hold the last preferred content size reported by the embedded surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PopupDetail {
    pub src: Option<String>,
    pub top: Option<i32>,
    pub left: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl PopupDetail {
    /// A popup for `src` anchored at (`left`, `top`), not sized yet.
    pub fn anchored(src: impl Into<String>, left: i32, top: i32) -> Self {
        Self {
            src: Some(src.into()),
            top: Some(top),
            left: Some(left),
            width: None,
            height: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// The non-empty source url, if any.
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref().filter(|src| !src.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.src().is_none()
    }

    pub fn preferred_size(&self) -> Option<Vec2> {
        Some(Vec2::new(self.width? as f32, self.height? as f32))
    }

    pub(crate) fn anchored_rect(&self) -> AnchoredRect {
        AnchoredRect {
            top: self.top,
            left: self.left,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_src_string_counts_as_no_popup() {
        assert!(PopupDetail::anchored("", 1, 2).is_empty());
        assert!(PopupDetail::default().is_empty());
        assert!(!PopupDetail::anchored("chrome-extension://abc/popup.html", 1, 2).is_empty());
    }

    #[test]
    fn preferred_size_needs_both_extents() {
        let detail = PopupDetail::anchored("x", 0, 0);
        assert_eq!(detail.preferred_size(), None);
        assert_eq!(
            detail.with_size(320, 240).preferred_size(),
            Some(Vec2::new(320.0, 240.0))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_deserialize_as_unset() {
        let detail: PopupDetail =
            serde_json::from_str(r#"{"src":"https://example.com","left":12}"#)
                .expect("valid detail json");
        assert_eq!(detail.src(), Some("https://example.com"));
        assert_eq!(detail.left, Some(12));
        assert_eq!(detail.top, None);
        assert_eq!(detail.preferred_size(), None);
    }
}
