//! Floating toolbar geometry
//!
//! The editor shows a primary bar (tools, undo/redo, save/cancel) under the
//! selection and a secondary style bar (stroke widths, palette) above the
//! primary one. This module only computes rectangles; painting them is up to
//! the platform layer.

use crate::config::{PALETTE, STROKE_WIDTHS, Tool};
use crate::domain::{Point, Rect};
use crate::session::messages::Msg;

/// Primary bar metrics
pub mod primary {
    pub const BUTTON_SIZE: i32 = 48;
    pub const BUTTON_GAP: i32 = 3;
    pub const PADDING: i32 = 10;
    pub const SEPARATOR_WIDTH: i32 = 14;
    pub const CORNER_RADIUS: i32 = 14;
    /// Distance between the selection and the bar
    pub const SELECTION_GAP: i32 = 10;
    pub const HEIGHT: i32 = 58;
}

/// Secondary (style) bar metrics
pub mod secondary {
    pub const HEIGHT: i32 = 48;
    /// Distance between the secondary and primary bars
    pub const BAR_GAP: i32 = 6;
    pub const SWATCH_SIZE: i32 = 28;
    pub const SWATCH_GAP: i32 = 5;
    pub const STROKE_WIDTH_GAP: i32 = 14;
}

/// What a toolbar button does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    Tool(Tool),
    Undo,
    Redo,
    Save,
    Cancel,
    StrokeWidth(u32),
    /// Index into [`PALETTE`]
    Color(usize),
}

impl ButtonKind {
    /// Message sent when the button is clicked
    pub fn message(self) -> Option<Msg> {
        Some(match self {
            ButtonKind::Tool(tool) => Msg::select_tool(tool),
            ButtonKind::Undo => Msg::undo(),
            ButtonKind::Redo => Msg::redo(),
            ButtonKind::Save => Msg::save(),
            ButtonKind::Cancel => Msg::cancel(),
            ButtonKind::StrokeWidth(width) => Msg::stroke_width(width),
            ButtonKind::Color(index) => Msg::color(*PALETTE.get(index)?),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolbarButton {
    pub rect: Rect,
    pub kind: ButtonKind,
}

/// Placement of both bars and their buttons, in screen coordinates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolbarLayout {
    pub primary: Rect,
    pub secondary: Rect,
    pub secondary_visible: bool,
    pub primary_buttons: Vec<ToolbarButton>,
    pub secondary_buttons: Vec<ToolbarButton>,
}

/// Width of the primary bar: tools | undo redo | save cancel
pub fn primary_width() -> i32 {
    use primary::*;
    let tool_count = Tool::ALL.len() as i32;
    let tools = tool_count * BUTTON_SIZE + (tool_count - 1) * BUTTON_GAP;
    let pair = 2 * BUTTON_SIZE + BUTTON_GAP;
    PADDING + tools + SEPARATOR_WIDTH + pair + SEPARATOR_WIDTH + pair + PADDING
}

/// Width of the secondary bar: stroke widths | palette
pub fn secondary_width() -> i32 {
    use secondary::*;
    let widths = STROKE_WIDTHS.len() as i32;
    let colors = PALETTE.len() as i32;
    let width_area = widths * SWATCH_SIZE + (widths - 1) * STROKE_WIDTH_GAP;
    let color_area = colors * SWATCH_SIZE + (colors - 1) * SWATCH_GAP;
    primary::PADDING + width_area + primary::SEPARATOR_WIDTH + color_area + primary::PADDING
}

/// Clamp `start` so that `[start, start + len)` stays within `[lo, hi)`,
/// preferring the low edge when it does not fit
fn clamp_span(start: i32, len: i32, lo: i32, hi: i32) -> i32 {
    start.min(hi - len).max(lo)
}

impl ToolbarLayout {
    /// Lay out both bars for `selection` on `screen`
    pub fn compute(selection: &Rect, screen: &Rect, tool: Tool) -> Self {
        let primary_w = primary_width();
        let primary_h = primary::HEIGHT;

        // Right-aligned under the selection, flipped above on bottom overflow
        let mut top = selection.bottom + primary::SELECTION_GAP;
        if top + primary_h > screen.bottom {
            top = selection.top - primary::SELECTION_GAP - primary_h;
        }
        let top = clamp_span(top, primary_h, screen.top, screen.bottom);
        let left = clamp_span(selection.right - primary_w, primary_w, screen.left, screen.right);
        let primary = Rect::from_xywh(left, top, primary_w, primary_h);

        let secondary_w = secondary_width();
        let secondary_h = secondary::HEIGHT;
        let secondary_top = clamp_span(
            primary.top - secondary::BAR_GAP - secondary_h,
            secondary_h,
            screen.top,
            screen.bottom,
        );
        let secondary_left = clamp_span(
            primary.right - secondary_w,
            secondary_w,
            screen.left,
            screen.right,
        );
        let secondary = Rect::from_xywh(secondary_left, secondary_top, secondary_w, secondary_h);

        Self {
            primary_buttons: primary_buttons(&primary),
            secondary_buttons: secondary_buttons(&secondary),
            primary,
            secondary,
            secondary_visible: tool.uses_style_panel(),
        }
    }

    /// Whether `p` is over a visible bar
    pub fn contains(&self, p: Point) -> bool {
        self.primary.contains(p) || (self.secondary_visible && self.secondary.contains(p))
    }

    /// Button under `p`; the secondary bar is checked first
    pub fn hit_test(&self, p: Point) -> Option<ButtonKind> {
        let secondary = self
            .secondary_visible
            .then_some(self.secondary_buttons.as_slice())
            .unwrap_or_default();
        secondary
            .iter()
            .chain(&self.primary_buttons)
            .find(|button| button.rect.contains(p))
            .map(|button| button.kind)
    }
}

fn primary_buttons(bar: &Rect) -> Vec<ToolbarButton> {
    use primary::*;
    let y = bar.top + (HEIGHT - BUTTON_SIZE) / 2;
    let mut x = bar.left + PADDING;
    let mut buttons = Vec::with_capacity(Tool::ALL.len() + 4);

    let mut push = |x: &mut i32, kind| {
        buttons.push(ToolbarButton {
            rect: Rect::from_xywh(*x, y, BUTTON_SIZE, BUTTON_SIZE),
            kind,
        });
        *x += BUTTON_SIZE + BUTTON_GAP;
    };

    for tool in Tool::ALL {
        push(&mut x, ButtonKind::Tool(tool));
    }
    x += SEPARATOR_WIDTH - BUTTON_GAP;
    push(&mut x, ButtonKind::Undo);
    push(&mut x, ButtonKind::Redo);
    x += SEPARATOR_WIDTH - BUTTON_GAP;
    push(&mut x, ButtonKind::Save);
    push(&mut x, ButtonKind::Cancel);

    buttons
}

fn secondary_buttons(bar: &Rect) -> Vec<ToolbarButton> {
    use secondary::*;
    let y = bar.top + (HEIGHT - SWATCH_SIZE) / 2;
    let mut x = bar.left + primary::PADDING;
    let mut buttons = Vec::with_capacity(STROKE_WIDTHS.len() + PALETTE.len());

    for width in STROKE_WIDTHS {
        buttons.push(ToolbarButton {
            rect: Rect::from_xywh(x, y, SWATCH_SIZE, SWATCH_SIZE),
            kind: ButtonKind::StrokeWidth(width),
        });
        x += SWATCH_SIZE + STROKE_WIDTH_GAP;
    }
    x += primary::SEPARATOR_WIDTH - STROKE_WIDTH_GAP;
    for index in 0..PALETTE.len() {
        buttons.push(ToolbarButton {
            rect: Rect::from_xywh(x, y, SWATCH_SIZE, SWATCH_SIZE),
            kind: ButtonKind::Color(index),
        });
        x += SWATCH_SIZE + SWATCH_GAP;
    }

    buttons
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn test_bar_widths() {
        // 10 + (7*48 + 6*3) + 14 + 99 + 14 + 99 + 10
        assert_eq!(primary_width(), 600);
        // 10 + (3*28 + 2*14) + 14 + (8*28 + 7*5) + 10
        assert_eq!(secondary_width(), 405);
    }

    #[test]
    fn test_primary_below_selection_right_aligned() {
        let layout = ToolbarLayout::compute(&Rect::new(100, 100, 900, 600), &SCREEN, Tool::Rectangle);
        assert_eq!(layout.primary, Rect::new(300, 610, 900, 668));
        assert_eq!(layout.secondary, Rect::new(495, 556, 900, 604));
        assert!(layout.secondary_visible);
    }

    #[test]
    fn test_primary_flips_above_on_bottom_overflow() {
        let layout = ToolbarLayout::compute(&Rect::new(100, 500, 900, 1050), &SCREEN, Tool::Line);
        assert_eq!(layout.primary.top, 432);
        assert_eq!(layout.primary.bottom, 490);
        assert_eq!(layout.secondary.top, 432 - 6 - 48);
    }

    #[test]
    fn test_bars_clamped_on_screen() {
        // Full-screen selection: no room below or above
        let layout = ToolbarLayout::compute(&SCREEN, &SCREEN, Tool::Arrow);
        assert_eq!(layout.primary, Rect::new(1320, 0, 1920, 58));
        assert_eq!(layout.secondary.top, 0);

        // Narrow selection at the left edge
        let layout = ToolbarLayout::compute(&Rect::new(0, 0, 200, 200), &SCREEN, Tool::Arrow);
        assert_eq!(layout.primary.left, 0);
        assert_eq!(layout.secondary.left, 195);
    }

    #[test]
    fn test_secondary_hidden_for_text() {
        let layout = ToolbarLayout::compute(&Rect::new(100, 100, 900, 600), &SCREEN, Tool::Text);
        assert!(!layout.secondary_visible);
        let swatch = layout.secondary_buttons[0].rect.origin();
        assert!(!layout.contains(swatch));
        assert_eq!(layout.hit_test(swatch), None);
    }

    #[test]
    fn test_button_order_and_hits() {
        let layout = ToolbarLayout::compute(&Rect::new(100, 100, 900, 600), &SCREEN, Tool::Rectangle);
        let kinds: Vec<_> = layout.primary_buttons.iter().map(|b| b.kind).collect();
        assert_eq!(kinds.len(), 11);
        assert_eq!(kinds[0], ButtonKind::Tool(Tool::Rectangle));
        assert_eq!(kinds[6], ButtonKind::Tool(Tool::Mosaic));
        assert_eq!(&kinds[7..], &[ButtonKind::Undo, ButtonKind::Redo, ButtonKind::Save, ButtonKind::Cancel]);

        // First tool button starts at padding, vertically centered
        assert_eq!(layout.primary_buttons[0].rect, Rect::new(310, 615, 358, 663));
        // Undo sits after the tools plus one separator
        assert_eq!(layout.primary_buttons[7].rect.left, 310 + 7 * 51 + 11);

        assert_eq!(layout.hit_test(Point::new(320, 620)), Some(ButtonKind::Tool(Tool::Rectangle)));
        // Gap between buttons
        assert_eq!(layout.hit_test(Point::new(359, 620)), None);
        assert!(layout.contains(Point::new(359, 620)));

        let secondary: Vec<_> = layout.secondary_buttons.iter().map(|b| b.kind).collect();
        assert_eq!(&secondary[..3], &[
            ButtonKind::StrokeWidth(2),
            ButtonKind::StrokeWidth(4),
            ButtonKind::StrokeWidth(8),
        ]);
        assert_eq!(secondary[3], ButtonKind::Color(0));
        assert_eq!(secondary.len(), 11);
        assert_eq!(layout.secondary_buttons[0].rect, Rect::new(505, 566, 533, 594));
        assert_eq!(layout.secondary_buttons[3].rect.left, 505 + 3 * 42 - 14 + 14);
    }

    #[test]
    fn test_button_messages() {
        assert_eq!(ButtonKind::Color(1).message(), Some(Msg::color(PALETTE[1])));
        assert_eq!(ButtonKind::Color(99).message(), None);
        assert_eq!(ButtonKind::Save.message(), Some(Msg::save()));
    }
}
