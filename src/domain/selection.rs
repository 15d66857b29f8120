//! Selection rectangle handles and drag geometry

use super::geometry::{Point, Rect};

/// Radius of the circular hot-zone around each resize handle
pub const HANDLE_HIT_RADIUS: i32 = 8;
/// Distance on either side of the selection edge that grabs the border
pub const BORDER_HIT_SIZE: i32 = 5;
/// Smallest width/height a resize may produce
pub const MIN_SELECTION_SIZE: i32 = 20;

/// Resize handle, numbered clockwise from the top-left corner
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// North-West corner
    NW = 0,
    /// North edge
    N = 1,
    /// North-East corner
    NE = 2,
    /// East edge
    E = 3,
    /// South-East corner
    SE = 4,
    /// South edge
    S = 5,
    /// South-West corner
    SW = 6,
    /// West edge
    W = 7,
}

impl TryFrom<u8> for Handle {
    type Error = u8;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Handle::NW),
            1 => Ok(Handle::N),
            2 => Ok(Handle::NE),
            3 => Ok(Handle::E),
            4 => Ok(Handle::SE),
            5 => Ok(Handle::S),
            6 => Ok(Handle::SW),
            7 => Ok(Handle::W),
            other => Err(other),
        }
    }
}

impl From<Handle> for u8 {
    fn from(handle: Handle) -> Self {
        handle as u8
    }
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::NW,
        Handle::N,
        Handle::NE,
        Handle::E,
        Handle::SE,
        Handle::S,
        Handle::SW,
        Handle::W,
    ];

    pub fn index(self) -> u8 {
        self.into()
    }

    /// Center of this handle on the given rectangle
    pub fn position(self, r: &Rect) -> Point {
        let mid_x = (r.left + r.right) / 2;
        let mid_y = (r.top + r.bottom) / 2;
        match self {
            Handle::NW => Point::new(r.left, r.top),
            Handle::N => Point::new(mid_x, r.top),
            Handle::NE => Point::new(r.right, r.top),
            Handle::E => Point::new(r.right, mid_y),
            Handle::SE => Point::new(r.right, r.bottom),
            Handle::S => Point::new(mid_x, r.bottom),
            Handle::SW => Point::new(r.left, r.bottom),
            Handle::W => Point::new(r.left, mid_y),
        }
    }

    fn moves_left(self) -> bool {
        matches!(self, Handle::NW | Handle::SW | Handle::W)
    }

    fn moves_right(self) -> bool {
        matches!(self, Handle::NE | Handle::E | Handle::SE)
    }

    fn moves_top(self) -> bool {
        matches!(self, Handle::NW | Handle::N | Handle::NE)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Handle::SE | Handle::S | Handle::SW)
    }
}

/// What a drag on the selection does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize(Handle),
}

/// Handle whose hot-zone contains `p`, if any
pub fn hit_test_handle(r: &Rect, p: Point) -> Option<Handle> {
    let radius_sq = (HANDLE_HIT_RADIUS as i64).pow(2);
    Handle::ALL
        .into_iter()
        .find(|h| h.position(r).distance_sq(p) <= radius_sq)
}

/// Whether `p` lies in the ring around the selection edge
pub fn is_on_border(r: &Rect, p: Point) -> bool {
    let outer = r.inflate(BORDER_HIT_SIZE);
    let inner = r.inflate(-BORDER_HIT_SIZE);
    outer.contains(p) && !inner.contains(p)
}

/// Classify a press on the selection; handles win over the border ring
pub fn hit_test(r: &Rect, p: Point) -> Option<DragMode> {
    if let Some(handle) = hit_test_handle(r, p) {
        return Some(DragMode::Resize(handle));
    }
    is_on_border(r, p).then_some(DragMode::Move)
}

/// Translate `start` by the pointer delta, then push it back inside `screen`
pub fn apply_move(start: Rect, dx: i32, dy: i32, screen: Rect) -> Rect {
    let mut r = start.translate(dx, dy);
    if r.left < screen.left {
        r = r.translate(screen.left - r.left, 0);
    }
    if r.top < screen.top {
        r = r.translate(0, screen.top - r.top);
    }
    if r.right > screen.right {
        r = r.translate(screen.right - r.right, 0);
    }
    if r.bottom > screen.bottom {
        r = r.translate(0, screen.bottom - r.bottom);
    }
    r
}

/// Move the edges owned by `handle` by the pointer delta.
///
/// Each axis keeps at least [`MIN_SELECTION_SIZE`] by pinning the edge being
/// dragged; the result is then clamped to `capture`.
pub fn apply_resize(start: Rect, handle: Handle, dx: i32, dy: i32, capture: Rect) -> Rect {
    let mut r = start;
    if handle.moves_left() {
        r.left += dx;
    }
    if handle.moves_right() {
        r.right += dx;
    }
    if handle.moves_top() {
        r.top += dy;
    }
    if handle.moves_bottom() {
        r.bottom += dy;
    }

    if r.width() < MIN_SELECTION_SIZE {
        if handle.moves_left() {
            r.left = r.right - MIN_SELECTION_SIZE;
        } else {
            r.right = r.left + MIN_SELECTION_SIZE;
        }
    }
    if r.height() < MIN_SELECTION_SIZE {
        if handle.moves_top() {
            r.top = r.bottom - MIN_SELECTION_SIZE;
        } else {
            r.bottom = r.top + MIN_SELECTION_SIZE;
        }
    }

    let (left, right) = fit_span(r.left, r.right, capture.left, capture.right);
    let (top, bottom) = fit_span(r.top, r.bottom, capture.top, capture.bottom);
    Rect {
        left,
        top,
        right,
        bottom,
    }
}

/// Clamp `lo..hi` into `min..max`, growing it back to the minimum size when
/// the clamp cut it short. A capture narrower than the minimum wins.
fn fit_span(lo: i32, hi: i32, min: i32, max: i32) -> (i32, i32) {
    let (mut lo, mut hi) = (lo.max(min), hi.min(max));
    if hi - lo < MIN_SELECTION_SIZE {
        hi = (lo + MIN_SELECTION_SIZE).min(max);
        lo = (hi - MIN_SELECTION_SIZE).max(min);
    }
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 400, 300);

    #[test]
    fn test_handle_index_round_trip() {
        for (i, handle) in Handle::ALL.into_iter().enumerate() {
            assert_eq!(handle.index() as usize, i);
            assert_eq!(Handle::try_from(i as u8), Ok(handle));
        }
        assert_eq!(Handle::try_from(8), Err(8));
    }

    #[test]
    fn test_handle_beats_border() {
        let r = Rect::new(50, 50, 150, 150);
        // On the corner: inside both the handle circle and the border ring
        let p = Point::new(52, 48);
        assert!(is_on_border(&r, p));
        assert_eq!(hit_test(&r, p), Some(DragMode::Resize(Handle::NW)));
        // Mid-edge midpoint belongs to the edge handle
        assert_eq!(
            hit_test(&r, Point::new(100, 151)),
            Some(DragMode::Resize(Handle::S))
        );
    }

    #[test]
    fn test_border_ring_away_from_handles() {
        let r = Rect::new(50, 50, 150, 150);
        assert_eq!(hit_test(&r, Point::new(75, 53)), Some(DragMode::Move));
        assert_eq!(hit_test(&r, Point::new(75, 46)), Some(DragMode::Move));
        assert_eq!(hit_test(&r, Point::new(75, 60)), None);
        assert_eq!(hit_test(&r, Point::new(75, 40)), None);
    }

    #[test]
    fn test_handle_hit_zone_is_circular() {
        let r = Rect::new(100, 100, 200, 200);
        // 6,6 away: inside the 8px square but outside the 8px circle
        assert_eq!(hit_test_handle(&r, Point::new(94, 94)), None);
        assert_eq!(hit_test_handle(&r, Point::new(95, 95)), Some(Handle::NW));
    }

    #[test]
    fn test_move_clamps_without_resizing() {
        let start = Rect::new(10, 10, 110, 60);
        let moved = apply_move(start, -50, 500, SCREEN);
        assert_eq!(moved, Rect::new(0, 250, 100, 300));
        assert_eq!(moved.width(), start.width());
        assert_eq!(moved.height(), start.height());
    }

    #[test]
    fn test_resize_bottom_right_scenario() {
        let capture = Rect::new(0, 0, 400, 300);
        let start = Rect::new(0, 0, 100, 100);
        assert_eq!(
            apply_resize(start, Handle::SE, 20, 10, capture),
            Rect::new(0, 0, 120, 110)
        );
        // Width collapses below the minimum and gets pinned at 20
        let squeezed = apply_resize(start, Handle::SE, -95, 30, capture);
        assert_eq!(squeezed, Rect::new(0, 0, 20, 130));
        let further = apply_resize(start, Handle::SE, -150, 45, capture);
        assert_eq!(further.width(), 20);
        assert_eq!(further.height(), 145);
    }

    #[test]
    fn test_resize_pins_dragged_edge_for_left_handles() {
        let capture = Rect::new(0, 0, 400, 300);
        let start = Rect::new(100, 100, 200, 200);
        let r = apply_resize(start, Handle::NW, 150, 150, capture);
        assert_eq!(r, Rect::new(180, 180, 200, 200));
    }

    #[test]
    fn test_resize_edge_handle_moves_one_edge() {
        let capture = Rect::new(0, 0, 400, 300);
        let start = Rect::new(100, 100, 200, 200);
        assert_eq!(
            apply_resize(start, Handle::E, 30, 99, capture),
            Rect::new(100, 100, 230, 200)
        );
        assert_eq!(
            apply_resize(start, Handle::N, 99, -30, capture),
            Rect::new(100, 70, 200, 200)
        );
    }

    #[test]
    fn test_resize_clamps_to_capture() {
        let capture = Rect::new(0, 0, 400, 300);
        let start = Rect::new(100, 100, 200, 200);
        assert_eq!(
            apply_resize(start, Handle::SE, 500, 500, capture),
            Rect::new(100, 100, 400, 300)
        );
        assert_eq!(
            apply_resize(start, Handle::NW, -500, -500, capture),
            Rect::new(0, 0, 200, 200)
        );
    }

    #[test]
    fn test_resize_at_capture_edge_keeps_minimum() {
        let capture = Rect::new(0, 0, 400, 300);
        let start = Rect::new(390, 0, 400, 100);
        assert_eq!(
            apply_resize(start, Handle::E, -5, 0, capture),
            Rect::new(380, 0, 400, 100)
        );
        let top = Rect::new(0, 0, 100, 10);
        assert_eq!(
            apply_resize(top, Handle::N, 0, -5, capture),
            Rect::new(0, 0, 100, 20)
        );
        // Nothing to grow into
        let tiny = Rect::new(0, 0, 10, 10);
        assert_eq!(
            apply_resize(tiny, Handle::SE, 40, 40, tiny),
            Rect::new(0, 0, 10, 10)
        );
    }
}
