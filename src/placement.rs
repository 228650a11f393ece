//! Keep an anchored overlay inside the viewport by flipping the edge it is anchored to.
//!
//! The policy mirrors how CSS-positioned flyouts behave: an overlay is pinned to its anchor
//! point from the top/left while it fits, and pinned to the opposite viewport edge once it
//! would overflow.

use egui::{Pos2, Vec2};

/// Inset used when an overlay is flipped to the right edge, in `em`.
pub const DEFAULT_RIGHT_INSET_EM: f32 = 1.0;

/// The anchor point and preferred size of an overlay, in points.
///
/// Every field is optional: an unset coordinate leaves that axis unconstrained, an unset
/// extent means the content has not reported a size yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnchoredRect {
    pub top: Option<i32>,
    pub left: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalEdge {
    /// Distance from the top of the viewport.
    Top(f32),
    /// Distance from the bottom of the viewport.
    Bottom(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HorizontalEdge {
    /// Distance from the left of the viewport, in points.
    Left(f32),
    /// Distance from the right of the viewport, in `em`.
    RightEm(f32),
}

/// Edge assignments for an overlay. `None` on an axis means "keep the caller's default".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub vertical: Option<VerticalEdge>,
    pub horizontal: Option<HorizontalEdge>,

    /// False until the overlay knows its size: it is laid out for measurement but fully
    /// transparent.
    pub visible: bool,
}

impl Placement {
    /// Content anchored to the right edge grows leftwards, so it should lay out in reverse.
    pub fn reverse_expand(&self) -> bool {
        matches!(self.horizontal, Some(HorizontalEdge::RightEm(_)))
    }

    /// Absolute top-left corner of an overlay of `size` inside `viewport`.
    ///
    /// `em` is the size of one `em` in points. An unconstrained axis resolves to `0`.
    pub fn resolve(&self, size: Vec2, viewport: Vec2, em: f32) -> Pos2 {
        let x = match self.horizontal {
            Some(HorizontalEdge::Left(left)) => left,
            Some(HorizontalEdge::RightEm(inset)) => viewport.x - size.x - inset * em,
            None => 0.0,
        };
        let y = match self.vertical {
            Some(VerticalEdge::Top(top)) => top,
            Some(VerticalEdge::Bottom(bottom)) => viewport.y - size.y - bottom,
            None => 0.0,
        };
        Pos2::new(x, y)
    }
}

/// Place `rect` inside a viewport of size `viewport`, flipping to the right edge with an
/// inset of `right_inset_em`.
///
/// An axis with a coordinate but no extent never counts as fitting, so it is anchored to the
/// far edge until the first size report arrives (the overlay is invisible meanwhile).
pub fn place(rect: AnchoredRect, viewport: Vec2, right_inset_em: f32) -> Placement {
    let vertical = rect.top.map(|top| {
        if fits(top, rect.height, viewport.y) {
            VerticalEdge::Top(top as f32)
        } else {
            VerticalEdge::Bottom(0.0)
        }
    });

    let horizontal = rect.left.map(|left| {
        if fits(left, rect.width, viewport.x) {
            HorizontalEdge::Left(left as f32)
        } else {
            HorizontalEdge::RightEm(right_inset_em)
        }
    });

    Placement {
        vertical,
        horizontal,
        visible: rect.width.is_some() && rect.height.is_some(),
    }
}

fn fits(start: i32, extent: Option<i32>, viewport_extent: f32) -> bool {
    extent.is_some_and(|extent| ((i64::from(start) + i64::from(extent)) as f32) < viewport_extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn rect(top: i32, left: i32, width: i32, height: i32) -> AnchoredRect {
        AnchoredRect {
            top: Some(top),
            left: Some(left),
            width: Some(width),
            height: Some(height),
        }
    }

    #[test]
    fn fitting_rect_keeps_its_anchor() {
        let placement = place(rect(40, 100, 200, 300), VIEWPORT, 1.0);
        assert_eq!(placement.vertical, Some(VerticalEdge::Top(40.0)));
        assert_eq!(placement.horizontal, Some(HorizontalEdge::Left(100.0)));
        assert!(placement.visible);
        assert!(!placement.reverse_expand());
    }

    #[test]
    fn overflowing_rect_flips_to_far_edges() {
        let placement = place(rect(400, 700, 200, 300), VIEWPORT, 1.0);
        assert_eq!(placement.vertical, Some(VerticalEdge::Bottom(0.0)));
        assert_eq!(placement.horizontal, Some(HorizontalEdge::RightEm(1.0)));
        assert!(placement.reverse_expand());
    }

    #[test]
    fn touching_the_edge_counts_as_overflow() {
        // top + height == viewport height: strict `<` fails.
        let placement = place(rect(300, 600, 200, 300), VIEWPORT, 1.0);
        assert_eq!(placement.vertical, Some(VerticalEdge::Bottom(0.0)));
        assert_eq!(placement.horizontal, Some(HorizontalEdge::RightEm(1.0)));
    }

    #[test]
    fn exactly_one_vertical_edge_for_every_top() {
        for top in (0..700).step_by(50) {
            for height in (0..700).step_by(70) {
                let placement = place(rect(top, 0, 10, height), VIEWPORT, 1.0);
                let expect_top = ((top + height) as f32) < VIEWPORT.y;
                match placement.vertical {
                    Some(VerticalEdge::Top(t)) => {
                        assert!(expect_top, "top={top} height={height}");
                        assert_eq!(t, top as f32);
                    }
                    Some(VerticalEdge::Bottom(b)) => {
                        assert!(!expect_top, "top={top} height={height}");
                        assert_eq!(b, 0.0);
                    }
                    None => panic!("vertical edge missing for top={top}"),
                }
            }
        }
    }

    #[test]
    fn exactly_one_horizontal_edge_for_every_left() {
        for left in (0..900).step_by(50) {
            for width in (0..900).step_by(90) {
                let placement = place(rect(0, left, width, 10), VIEWPORT, 1.5);
                let expect_left = ((left + width) as f32) < VIEWPORT.x;
                match placement.horizontal {
                    Some(HorizontalEdge::Left(l)) => {
                        assert!(expect_left, "left={left} width={width}");
                        assert_eq!(l, left as f32);
                        assert!(!placement.reverse_expand(), "left={left} width={width}");
                    }
                    Some(HorizontalEdge::RightEm(inset)) => {
                        assert!(!expect_left, "left={left} width={width}");
                        assert_eq!(inset, 1.5);
                        assert!(placement.reverse_expand(), "left={left} width={width}");
                    }
                    None => panic!("horizontal edge missing for left={left}"),
                }
            }
        }
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let placement = place(rect(i32::MAX, i32::MAX, i32::MAX, i32::MAX), VIEWPORT, 1.0);
        assert_eq!(placement.vertical, Some(VerticalEdge::Bottom(0.0)));
        assert_eq!(placement.horizontal, Some(HorizontalEdge::RightEm(1.0)));
    }

    #[test]
    fn unset_coordinates_leave_axes_unconstrained() {
        let placement = place(
            AnchoredRect {
                width: Some(100),
                height: Some(100),
                ..Default::default()
            },
            VIEWPORT,
            1.0,
        );
        assert_eq!(placement.vertical, None);
        assert_eq!(placement.horizontal, None);
        assert!(placement.visible);
    }

    #[test]
    fn unsized_rect_is_invisible_and_anchored_far() {
        let placement = place(
            AnchoredRect {
                top: Some(10),
                left: Some(10),
                ..Default::default()
            },
            VIEWPORT,
            1.0,
        );
        assert!(!placement.visible);
        assert_eq!(placement.vertical, Some(VerticalEdge::Bottom(0.0)));
        assert_eq!(placement.horizontal, Some(HorizontalEdge::RightEm(1.0)));
    }

    #[test]
    fn resolve_converts_edges_to_top_left() {
        let size = Vec2::new(200.0, 300.0);

        let fitting = place(rect(40, 100, 200, 300), VIEWPORT, 1.0);
        assert_eq!(fitting.resolve(size, VIEWPORT, 14.0), Pos2::new(100.0, 40.0));

        let flipped = place(rect(400, 700, 200, 300), VIEWPORT, 1.0);
        assert_eq!(
            flipped.resolve(size, VIEWPORT, 14.0),
            Pos2::new(800.0 - 200.0 - 14.0, 600.0 - 300.0)
        );
    }
}
