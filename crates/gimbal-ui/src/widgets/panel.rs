use glam::{Mat4, Vec2, Vec3};

use gimbal_engine::coords::Viewport;
use gimbal_engine::gfx::{Color, Painter, TextureId};
use gimbal_engine::hit;
use gimbal_engine::mvp::Mvp;
use gimbal_engine::scene::{Clickable, Draggable, LongPressable, Renderable};

/// Fraction of the unit screen the content area covers when expanded.
const CONTENT_WIDTH: f32 = 0.79;

/// Size of the pull tab in panel space.
const TAB_SIZE: Vec2 = Vec2::new(0.1, 0.2);

/// Width of the border strips flanking the tab.
const BORDER_WIDTH: f32 = TAB_SIZE.x / 2.0;

/// Which screen edge the panel docks against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PanelSide {
    Left,
    Right,
}

impl PanelSide {
    /// +1 toward the screen center for a left panel, -1 for a right panel.
    fn toward_center(self) -> f32 {
        match self {
            PanelSide::Left => 1.0,
            PanelSide::Right => -1.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum DragState {
    Idle,
    /// The tab was grabbed; drags slide the whole panel.
    Panel,
    /// The content claimed the gesture; drags are forwarded to it.
    Content,
}

/// Retractable side panel that can be loaded with content.
///
/// The pull tab slides the panel between its retracted and expanded rest
/// positions; a drop snaps to whichever end is nearer. Gestures offered
/// inside the panel go to the embedded content first, so the tab only wins a
/// pick-up the content declined.
pub struct DockablePanel<C> {
    content: C,
    side: PanelSide,
    /// Horizontal distances in panel space are divided by this so the panel
    /// keeps its proportions on any screen.
    aspect: f32,
    position: Vec2,
    x_retracted: f32,
    x_expanded: f32,
    drag: DragState,
    border_texture: Option<TextureId>,
    tab_texture: Option<TextureId>,
}

impl<C> DockablePanel<C> {
    pub fn new(
        content: C,
        side: PanelSide,
        viewport: Viewport,
        border_texture: Option<TextureId>,
        tab_texture: Option<TextureId>,
    ) -> Self {
        let aspect = viewport.aspect_ratio();
        let sign = side.toward_center();
        let x_retracted = sign * (-0.5 + (0.5 - CONTENT_WIDTH) / aspect);
        let x_expanded = x_retracted + sign * CONTENT_WIDTH / aspect;

        log::info!("panel docked {side:?}: retracted {x_retracted}, expanded {x_expanded}");

        Self {
            content,
            side,
            aspect,
            position: Vec2::new(x_retracted, 0.0),
            x_retracted,
            x_expanded,
            drag: DragState::Idle,
            border_texture,
            tab_texture,
        }
    }

    #[inline]
    pub fn content(&self) -> &C {
        &self.content
    }

    #[inline]
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    #[inline]
    pub fn is_retracted(&self) -> bool {
        self.position.x == self.x_retracted
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.position.x == self.x_expanded
    }

    /// Model transform of the content area, relative to the ancestor top.
    fn content_matrix(&self) -> Mat4 {
        let background_dx = -self.side.toward_center() * (0.5 - CONTENT_WIDTH / 2.0);
        Mat4::from_translation(self.position.extend(0.0))
            * Mat4::from_scale(Vec3::new(1.0 / self.aspect, 1.0, 1.0))
            * Mat4::from_translation(Vec3::new(background_dx, 0.0, 0.0))
    }

    /// Tab transform relative to the content area: out to the panel's inner
    /// edge, then half a tab width past the border strip.
    fn tab_matrix(&self) -> Mat4 {
        let sign = self.side.toward_center();
        Mat4::from_translation(Vec3::new(
            sign * (0.5 * CONTENT_WIDTH + 0.5 * (TAB_SIZE.x - BORDER_WIDTH)),
            0.0,
            0.0,
        )) * Mat4::from_scale(TAB_SIZE.extend(1.0))
    }

    /// Runs `f` in the content area's object space, depth-balanced on every
    /// exit path.
    fn enter_content<R>(&mut self, mvp: &mut Mvp, f: impl FnOnce(&mut C, &mut Mvp) -> R) -> R {
        let derived = mvp.peek_copy_model() * self.content_matrix();
        let content = &mut self.content;
        mvp.with_model(derived, |mvp| f(content, mvp))
    }

    fn clamp_travel(&self, x: f32) -> f32 {
        if self.x_retracted <= self.x_expanded {
            x.clamp(self.x_retracted, self.x_expanded)
        } else {
            x.clamp(self.x_expanded, self.x_retracted)
        }
    }
}

impl<C: Clickable> Clickable for DockablePanel<C> {
    fn handle_click(&mut self, mvp: &mut Mvp, click: Vec2) -> bool {
        self.enter_content(mvp, |content, mvp| content.handle_click(mvp, click))
    }
}

impl<C: LongPressable> LongPressable for DockablePanel<C> {
    fn handle_long_press(&mut self, mvp: &mut Mvp, press: Vec2) -> bool {
        self.enter_content(mvp, |content, mvp| content.handle_long_press(mvp, press))
    }
}

impl<C: Draggable> Draggable for DockablePanel<C> {
    fn handle_pick_up(&mut self, mvp: &mut Mvp, touch: Vec2) -> bool {
        // Content gets the first offer; the tab only claims what fell through.
        if self.enter_content(mvp, |content, mvp| content.handle_pick_up(mvp, touch)) {
            self.drag = DragState::Content;
            return true;
        }

        let tab = mvp.peek_copy_model() * self.content_matrix() * self.tab_matrix();
        if hit::is_touched_mat(&mvp.collapse_model(tab), touch) {
            self.drag = DragState::Panel;
            return true;
        }

        false
    }

    fn handle_drag(&mut self, delta: Vec2) -> bool {
        match self.drag {
            DragState::Panel => {
                self.position.x = self.clamp_travel(self.position.x + delta.x);
                true
            }
            DragState::Content => {
                // Content space is compressed horizontally by 1/aspect.
                let scaled = Vec2::new(delta.x * self.aspect, delta.y);
                self.content.handle_drag(scaled)
            }
            DragState::Idle => false,
        }
    }

    fn handle_drop(&mut self, drop: Vec2) -> bool {
        match self.drag {
            DragState::Panel => {
                let nearer_retracted = (self.position.x - self.x_retracted).abs()
                    <= (self.position.x - self.x_expanded).abs();
                self.position.x = if nearer_retracted {
                    self.x_retracted
                } else {
                    self.x_expanded
                };
                self.drag = DragState::Idle;
                true
            }
            DragState::Content => {
                self.drag = DragState::Idle;
                self.content.handle_drop(drop)
            }
            DragState::Idle => false,
        }
    }
}

impl<C: Renderable> Renderable for DockablePanel<C> {
    fn render(&self, mvp: &mut Mvp, painter: &mut dyn Painter) {
        let content_space = mvp.peek_copy_model() * self.content_matrix();

        // Background fills the content area.
        let background = content_space * Mat4::from_scale(Vec3::new(CONTENT_WIDTH, 1.0, 1.0));
        painter.draw_colored(
            &mvp.collapse_model(background).to_cols_array(),
            Color::PANEL_GRAY,
        );

        // Border strips above and below the tab on the panel's inner edge.
        let sign = self.side.toward_center();
        let edge = content_space
            * Mat4::from_translation(Vec3::new(sign * 0.5 * CONTENT_WIDTH, 0.0, 0.0));
        if let Some(border) = self.border_texture {
            let strip = edge * Mat4::from_scale(Vec3::new(BORDER_WIDTH, 1.0, 1.0));
            let above = strip
                * Mat4::from_translation(Vec3::new(0.0, 0.5 - TAB_SIZE.y / 2.0, 0.0));
            let below = strip
                * Mat4::from_translation(Vec3::new(0.0, -0.5 + TAB_SIZE.y / 2.0, 0.0));
            painter.draw_textured(&mvp.collapse_model(above).to_cols_array(), border);
            painter.draw_textured(&mvp.collapse_model(below).to_cols_array(), border);
        }

        if let Some(tab) = self.tab_texture {
            let tab_space = content_space * self.tab_matrix();
            painter.draw_textured(&mvp.collapse_model(tab_space).to_cols_array(), tab);
        }

        // A fully retracted panel shows only its tab and border.
        if !self.is_retracted() {
            mvp.with_model(content_space, |mvp| self.content.render(mvp, painter));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::label::test_support::RecordingPainter;
    use super::*;
    use gimbal_engine::scene::Placement;

    /// Content stand-in; claims pick-ups on demand and records what it gets.
    struct Probe {
        claim_pick_up: bool,
        placement: Placement,
        hits: u32,
        drags: Vec<Vec2>,
        drops: u32,
    }

    impl Probe {
        fn new(claim_pick_up: bool) -> Self {
            Self {
                claim_pick_up,
                placement: Placement::at(Vec2::ZERO, Vec2::new(0.2, 0.2)).unwrap(),
                hits: 0,
                drags: Vec::new(),
                drops: 0,
            }
        }
    }

    impl Clickable for Probe {
        fn handle_click(&mut self, mvp: &mut Mvp, click: Vec2) -> bool {
            let placement = self.placement;
            placement.enter(mvp, |mvp| {
                if !hit::is_touched(mvp, click) {
                    return false;
                }
                self.hits += 1;
                true
            })
        }
    }

    impl LongPressable for Probe {}

    impl Draggable for Probe {
        fn handle_pick_up(&mut self, _mvp: &mut Mvp, _touch: Vec2) -> bool {
            self.claim_pick_up
        }

        fn handle_drag(&mut self, delta: Vec2) -> bool {
            self.drags.push(delta);
            true
        }

        fn handle_drop(&mut self, _drop: Vec2) -> bool {
            self.drops += 1;
            true
        }
    }

    impl Renderable for Probe {
        fn render(&self, mvp: &mut Mvp, painter: &mut dyn Painter) {
            painter.draw_textured(&mvp.collapse().to_cols_array(), TextureId(99));
        }
    }

    // Square viewport keeps the numbers readable: retracted at -0.79,
    // expanded at 0.0, tab center at x_panel - 0.105 + 0.42.
    fn left_panel(claim: bool) -> DockablePanel<Probe> {
        DockablePanel::new(
            Probe::new(claim),
            PanelSide::Left,
            Viewport::new(400.0, 400.0),
            Some(TextureId(1)),
            Some(TextureId(2)),
        )
    }

    const TAB_TOUCH: Vec2 = Vec2::new(-0.45, 0.0);

    // ── travel ────────────────────────────────────────────────────────────

    #[test]
    fn rest_positions_for_a_square_screen() {
        let panel = left_panel(false);
        assert!((panel.x_retracted - -0.79).abs() < 1e-6);
        assert!(panel.x_expanded.abs() < 1e-6);
        assert!(panel.is_retracted());
    }

    #[test]
    fn tab_pick_up_slides_the_panel() {
        let mut panel = left_panel(false);
        let mut mvp = Mvp::new();

        assert!(panel.handle_pick_up(&mut mvp, TAB_TOUCH));
        assert_eq!(mvp.model_depth(), 1);

        assert!(panel.handle_drag(Vec2::new(0.3, 0.0)));
        assert!((panel.position.x - -0.49).abs() < 1e-6);
    }

    #[test]
    fn drag_is_clamped_to_the_travel_range() {
        let mut panel = left_panel(false);
        panel.handle_pick_up(&mut Mvp::new(), TAB_TOUCH);

        panel.handle_drag(Vec2::new(9.0, 0.0));
        assert!(panel.is_expanded());

        panel.handle_drag(Vec2::new(-9.0, 0.0));
        assert!(panel.is_retracted());
    }

    #[test]
    fn drop_snaps_to_the_nearer_rest_position() {
        let mut panel = left_panel(false);

        panel.handle_pick_up(&mut Mvp::new(), TAB_TOUCH);
        panel.handle_drag(Vec2::new(0.6, 0.0)); // past the midpoint
        assert!(panel.handle_drop(Vec2::ZERO));
        assert!(panel.is_expanded());

        panel.handle_pick_up(&mut Mvp::new(), Vec2::new(0.34, 0.0));
        panel.handle_drag(Vec2::new(-0.6, 0.0));
        assert!(panel.handle_drop(Vec2::ZERO));
        assert!(panel.is_retracted());
    }

    #[test]
    fn pick_up_outside_tab_and_content_is_declined() {
        let mut panel = left_panel(false);
        assert!(!panel.handle_pick_up(&mut Mvp::new(), Vec2::new(0.4, 0.4)));
        assert!(!panel.handle_drag(Vec2::new(0.1, 0.0)));
    }

    // ── claim ordering ────────────────────────────────────────────────────

    #[test]
    fn content_claims_before_the_tab() {
        let mut panel = left_panel(true);

        // The touch lands on the tab, but the content gets the first offer.
        assert!(panel.handle_pick_up(&mut Mvp::new(), TAB_TOUCH));
        panel.handle_drag(Vec2::new(0.3, 0.0));

        assert!(panel.is_retracted(), "panel must not move on a content drag");
        assert_eq!(panel.content().drags.len(), 1);
    }

    #[test]
    fn tab_claims_only_when_content_declines() {
        let mut panel = left_panel(false);
        assert!(panel.handle_pick_up(&mut Mvp::new(), TAB_TOUCH));
        panel.handle_drag(Vec2::new(0.2, 0.0));
        assert!(!panel.is_retracted());
        assert!(panel.content().drags.is_empty());
    }

    #[test]
    fn content_drags_are_stretched_by_the_aspect_ratio() {
        let mut panel = DockablePanel::new(
            Probe::new(true),
            PanelSide::Left,
            Viewport::new(800.0, 400.0),
            None,
            None,
        );

        panel.handle_pick_up(&mut Mvp::new(), Vec2::ZERO);
        panel.handle_drag(Vec2::new(0.1, 0.2));

        assert_eq!(panel.content().drags, vec![Vec2::new(0.2, 0.2)]);
    }

    #[test]
    fn content_drop_ends_the_gesture() {
        let mut panel = left_panel(true);
        panel.handle_pick_up(&mut Mvp::new(), Vec2::ZERO);

        assert!(panel.handle_drop(Vec2::ZERO));
        assert_eq!(panel.content().drops, 1);
        // Ownership released; the next drag has no owner.
        assert!(!panel.handle_drag(Vec2::new(0.1, 0.0)));
    }

    // ── clicks ────────────────────────────────────────────────────────────

    #[test]
    fn content_panic_does_not_leak_the_stack() {
        struct Explosive;

        impl Clickable for Explosive {
            fn handle_click(&mut self, _mvp: &mut Mvp, _click: Vec2) -> bool {
                panic!("content blew up");
            }
        }

        let mut panel = DockablePanel::new(
            Explosive,
            PanelSide::Left,
            Viewport::new(400.0, 400.0),
            None,
            None,
        );
        let mut mvp = Mvp::new();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            panel.handle_click(&mut mvp, Vec2::ZERO);
        }));

        assert!(result.is_err());
        assert_eq!(mvp.model_depth(), 1, "model matrix leaked on unwind");
    }

    #[test]
    fn clicks_are_offered_in_content_space() {
        let mut panel = left_panel(false);
        panel.position.x = panel.x_expanded; // content centered at -0.105

        let mut mvp = Mvp::new();
        assert!(panel.handle_click(&mut mvp, Vec2::new(-0.105, 0.0)));
        assert!(!panel.handle_click(&mut mvp, Vec2::new(0.3, 0.0)));
        assert_eq!(panel.content().hits, 1);
        assert_eq!(mvp.model_depth(), 1);
    }

    // ── rendering ─────────────────────────────────────────────────────────

    #[test]
    fn retracted_panel_renders_chrome_but_not_content() {
        let panel = left_panel(false);
        let mut painter = RecordingPainter::default();
        let mut mvp = Mvp::new();

        panel.render(&mut mvp, &mut painter);

        assert_eq!(painter.colored, vec![Color::PANEL_GRAY]);
        // Two border strips and the tab; no content probe.
        assert_eq!(painter.textured, vec![TextureId(1), TextureId(1), TextureId(2)]);
        assert_eq!(mvp.model_depth(), 1);
    }

    #[test]
    fn expanded_panel_renders_its_content() {
        let mut panel = left_panel(false);
        panel.position.x = panel.x_expanded;

        let mut painter = RecordingPainter::default();
        panel.render(&mut Mvp::new(), &mut painter);

        assert!(painter.textured.contains(&TextureId(99)));
    }
}
