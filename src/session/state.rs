//! Editing session state machine
//!
//! An [`EditorSession`] owns everything the editor needs between opening on
//! a capture and producing an [`EditorResult`]. Platform code forwards input
//! through [`EditorSession::handle_event`] and paints [`EditorSession::frame`].

use image::RgbaImage;

use crate::annotations::handlers::text_annotation;
use crate::annotations::{Draft, DrawStyle, History};
use crate::capture::crop_image;
use crate::capture::image::image_rect;
use crate::config::{EditorConfig, Tool};
use crate::domain::{Annotation, DragMode, Point, Rect, apply_move, apply_resize, hit_test};
use crate::render::render_scene;
use crate::session::messages::{
    DrawMsg, EditorResult, InputEvent, Msg, SessionMsg, SessionOutcome, TextMsg, ToolMsg,
};
use crate::session::shortcuts::handle_key_event;
use crate::widget::toolbar::ToolbarLayout;

/// Text being typed, anchored at its top-left corner in canvas coordinates
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextEdit {
    pub anchor: Point,
    pub buffer: String,
}

/// What the pointer is currently doing
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Drawing(Draft),
    TextEditing(TextEdit),
    DraggingSelection {
        mode: DragMode,
        start_pointer: Point,
        start_rect: Rect,
    },
}

/// Owned copy of everything needed to flatten the result
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSnapshot {
    pub background: RgbaImage,
    pub annotations: Vec<Annotation>,
}

impl SceneSnapshot {
    /// Background with every annotation drawn in order
    pub fn flatten(&self) -> RgbaImage {
        render_scene(&self.background, &self.annotations, None)
    }
}

#[derive(Debug)]
pub struct EditorSession {
    capture: RgbaImage,
    /// Bounds of the full capture; moves are confined to it
    screen: Rect,
    selection: Rect,
    /// The capture cropped to the selection; canvas coordinates index into it
    background: RgbaImage,
    history: History,
    tool: Tool,
    style: DrawStyle,
    state: InteractionState,
    toolbar: ToolbarLayout,
    outcome: Option<SessionOutcome>,
}

impl EditorSession {
    /// Open the editor on `capture` with an initial `selection`.
    ///
    /// Returns `None` when the selection does not overlap the capture.
    pub fn open(capture: RgbaImage, selection: Rect, config: &EditorConfig) -> Option<Self> {
        let screen = image_rect(&capture);
        let selection = selection.intersect(screen)?;
        let background = crop_image(&capture, selection)?;
        log::debug!(
            "Editor opened: capture {}x{}, selection {:?}",
            capture.width(),
            capture.height(),
            selection
        );

        let tool = Tool::default();
        Some(Self {
            capture,
            screen,
            selection,
            background,
            history: History::new(config.max_history),
            tool,
            style: DrawStyle {
                color: config.shape_color,
                stroke_width: config.stroke_width,
                font_size: config.font_size,
                mosaic_block_size: config.mosaic_block_size,
            },
            state: InteractionState::Idle,
            toolbar: ToolbarLayout::compute(&selection, &screen, tool),
            outcome: None,
        })
    }

    pub fn selection(&self) -> Rect {
        self.selection
    }

    pub fn background(&self) -> &RgbaImage {
        &self.background
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &DrawStyle {
        &self.style
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn toolbar(&self) -> &ToolbarLayout {
        &self.toolbar
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.history.annotations()
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn is_text_editing(&self) -> bool {
        matches!(self.state, InteractionState::TextEditing(_))
    }

    /// Annotation shown on top of the committed ones while editing
    pub fn preview(&self) -> Option<Annotation> {
        match &self.state {
            InteractionState::Drawing(draft) => draft.to_annotation(&self.style),
            InteractionState::TextEditing(edit) => {
                text_annotation(edit.anchor, &edit.buffer, &self.style)
            }
            _ => None,
        }
    }

    /// Current canvas contents including the preview
    pub fn frame(&self) -> RgbaImage {
        render_scene(
            &self.background,
            self.history.annotations(),
            self.preview().as_ref(),
        )
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            background: self.background.clone(),
            annotations: self.history.annotations().to_vec(),
        }
    }

    /// Consume the session; a session without outcome counts as cancelled
    pub fn into_result(self) -> EditorResult {
        match self.outcome {
            Some(SessionOutcome::Committed) => EditorResult::committed(render_scene(
                &self.background,
                self.history.annotations(),
                None,
            )),
            _ => EditorResult::cancelled(),
        }
    }

    /// Apply one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        if self.outcome.is_some() {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(Point::new(x, y)),
            InputEvent::DoubleClick { x, y } => self.double_click(Point::new(x, y)),
            InputEvent::SecondaryDown { .. } => self.secondary_down(),
            InputEvent::Key { key, modifiers } => {
                if let Some(msg) = handle_key_event(key, modifiers, self.is_text_editing()) {
                    self.update(msg);
                }
            }
            InputEvent::Char { ch } => match ch {
                // Backspace and friends arrive as keys
                ch if ch.is_control() => {}
                ch => self.update(Msg::insert_char(ch)),
            },
        }
    }

    /// Feed events until the stream ends or the session finishes
    pub fn replay(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.handle_event(event);
            if self.outcome.is_some() {
                break;
            }
        }
    }

    /// Apply a message from a shortcut or toolbar button
    pub fn update(&mut self, msg: Msg) {
        if self.outcome.is_some() {
            return;
        }
        match msg {
            Msg::Draw(DrawMsg::Undo) => {
                self.history.undo();
            }
            Msg::Draw(DrawMsg::Redo) => {
                self.history.redo();
            }
            Msg::Tool(ToolMsg::Select(tool)) => {
                self.commit_text();
                self.tool = tool;
                self.toolbar.secondary_visible = tool.uses_style_panel();
                log::debug!("Tool selected: {}", tool.name());
            }
            Msg::Tool(ToolMsg::SetStrokeWidth(width)) => self.style.stroke_width = width,
            Msg::Tool(ToolMsg::SetColor(color)) => self.style.color = color,
            Msg::Text(TextMsg::Insert(ch)) => {
                if let InteractionState::TextEditing(edit) = &mut self.state {
                    edit.buffer.push(ch);
                }
            }
            Msg::Text(TextMsg::Backspace) => {
                if let InteractionState::TextEditing(edit) = &mut self.state {
                    edit.buffer.pop();
                }
            }
            Msg::Session(SessionMsg::Escape) => match self.state {
                InteractionState::TextEditing(_) | InteractionState::Drawing(_) => {
                    self.state = InteractionState::Idle;
                }
                _ => self.finish(SessionOutcome::Cancelled),
            },
            Msg::Session(SessionMsg::Confirm) => {
                if self.is_text_editing() {
                    self.commit_text();
                } else {
                    self.finish(SessionOutcome::Committed);
                }
            }
            Msg::Session(SessionMsg::Save) => {
                self.commit_text();
                self.finish(SessionOutcome::Committed);
            }
            Msg::Session(SessionMsg::Cancel) => self.finish(SessionOutcome::Cancelled),
        }
    }

    fn to_canvas(&self, p: Point) -> Point {
        p.offset(-self.selection.left, -self.selection.top)
    }

    fn canvas_contains(&self, c: Point) -> bool {
        image_rect(&self.background).contains(c)
    }

    fn pointer_down(&mut self, p: Point) {
        if matches!(
            self.state,
            InteractionState::Drawing(_) | InteractionState::DraggingSelection { .. }
        ) {
            return;
        }

        // Toolbars swallow presses even between buttons
        if self.toolbar.contains(p) {
            if let Some(msg) = self.toolbar.hit_test(p).and_then(|kind| kind.message()) {
                self.update(msg);
            }
            return;
        }

        self.commit_text();

        if let Some(mode) = hit_test(&self.selection, p) {
            log::debug!("Selection drag started: {:?}", mode);
            self.state = InteractionState::DraggingSelection {
                mode,
                start_pointer: p,
                start_rect: self.selection,
            };
            return;
        }

        let c = self.to_canvas(p);
        if !self.canvas_contains(c) {
            return;
        }
        self.state = match self.tool {
            Tool::Text => InteractionState::TextEditing(TextEdit {
                anchor: c,
                buffer: String::new(),
            }),
            tool => InteractionState::Drawing(Draft::begin(tool, c)),
        };
    }

    fn pointer_move(&mut self, p: Point) {
        let c = self.to_canvas(p);
        match &mut self.state {
            InteractionState::DraggingSelection {
                mode,
                start_pointer,
                start_rect,
            } => {
                let (dx, dy) = (p.x - start_pointer.x, p.y - start_pointer.y);
                self.selection = match *mode {
                    DragMode::Move => apply_move(*start_rect, dx, dy, self.screen),
                    DragMode::Resize(handle) => {
                        apply_resize(*start_rect, handle, dx, dy, self.screen)
                    }
                };
                self.toolbar = ToolbarLayout::compute(&self.selection, &self.screen, self.tool);
            }
            InteractionState::Drawing(draft) => draft.update(c),
            _ => {}
        }
    }

    fn pointer_up(&mut self, p: Point) {
        match std::mem::take(&mut self.state) {
            InteractionState::DraggingSelection { .. } => {
                // Annotations keep their canvas coordinates
                if let Some(background) = crop_image(&self.capture, self.selection) {
                    self.background = background;
                }
                self.toolbar = ToolbarLayout::compute(&self.selection, &self.screen, self.tool);
                log::debug!("Selection drag finished: {:?}", self.selection);
            }
            InteractionState::Drawing(mut draft) => {
                draft.update(self.to_canvas(p));
                if draft.should_commit()
                    && let Some(annotation) = draft.to_annotation(&self.style)
                {
                    log::debug!("Committed {} annotation", draft.tool().name());
                    self.history.add_annotation(annotation);
                }
            }
            other => self.state = other,
        }
    }

    fn double_click(&mut self, p: Point) {
        if self.state == InteractionState::Idle
            && !self.toolbar.contains(p)
            && self.canvas_contains(self.to_canvas(p))
        {
            self.finish(SessionOutcome::Committed);
        }
    }

    fn secondary_down(&mut self) {
        match self.state {
            InteractionState::Drawing(_) | InteractionState::TextEditing(_) => {
                self.state = InteractionState::Idle;
            }
            _ => self.finish(SessionOutcome::Cancelled),
        }
    }

    /// Store pending text (if any) and leave text editing
    fn commit_text(&mut self) {
        if !self.is_text_editing() {
            return;
        }
        if let InteractionState::TextEditing(edit) = std::mem::take(&mut self.state)
            && let Some(annotation) = text_annotation(edit.anchor, &edit.buffer, &self.style)
        {
            self.history.add_annotation(annotation);
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.state = InteractionState::Idle;
        log::debug!("Editor finished: {:?}", outcome);
        self.outcome = Some(outcome);
    }
}

/// Run a whole editing session over a finite event stream.
///
/// A stream that ends before the session does counts as cancellation.
pub fn run_session(
    capture: RgbaImage,
    selection: Rect,
    events: impl IntoIterator<Item = InputEvent>,
    config: &EditorConfig,
) -> EditorResult {
    let Some(mut session) = EditorSession::open(capture, selection, config) else {
        log::debug!("Selection {:?} is outside the capture", selection);
        return EditorResult::cancelled();
    };
    session.replay(events);
    session.into_result()
}
