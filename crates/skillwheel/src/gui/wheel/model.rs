use crate::config::{Anchor, Config, SkillConfig};
use crate::gui::icons;
use crate::gui::wheel::{HUB_RADIUS, REFERENCE_HEIGHT, SKILL_RADIUS};
use gdk_pixbuf::Pixbuf;
use orbit::skill::{IconName, SkillName};
use orbit::{Animator, Command, Point, SkillId, WheelLayout};
use std::time::Duration;

#[derive(Clone)]
pub struct Skill {
    pub name: SkillName,
    pub pixbuf: Option<Pixbuf>,
}

impl Skill {
    pub fn new(name: SkillName, icon: Option<&IconName>) -> Self {
        let pixbuf = icon.and_then(icons::load_pixbuf);
        Self { name, pixbuf }
    }

    pub fn from_config(cfg: &SkillConfig) -> Self {
        Self::new(cfg.name.clone(), cfg.icon.as_ref())
    }
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Hub,
    Skill(SkillId),
}

impl Hit {
    pub fn command(self) -> Command {
        match self {
            Hit::Hub => Command::Toggle,
            Hit::Skill(id) => Command::Select(id),
        }
    }
}

/// Screen-space placement of one icon for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconGeometry {
    pub id: SkillId,
    pub center: Point,
    pub radius: f64,
    pub scale: f64,
    pub alpha: f64,
}

pub struct State {
    pub center: Point,
    pub skills: Vec<Skill>,
    pub animator: Animator,
    pub hover: Option<SkillId>,
    pub scale_factor: f64,
    pub anchor: Anchor,
    pub margin: f64,
    viewport: (f64, f64),
    last_frame: Option<i64>,
}

impl State {
    pub fn new(skills: Vec<Skill>, config: &Config) -> Self {
        let layout = WheelLayout::new(skills.len(), &config.wheel);
        Self {
            center: Point::default(),
            animator: Animator::new(layout, config.wheel.initial_state),
            skills,
            hover: None,
            scale_factor: 1.0,
            anchor: config.anchor,
            margin: config.margin,
            viewport: (0.0, 0.0),
            last_frame: None,
        }
    }

    pub fn init_skills(config: &Config) -> Vec<Skill> {
        config.skills.iter().map(Skill::from_config).collect()
    }

    /// Applies a reloaded config without resetting the wheel's rotation.
    pub fn reload(&mut self, skills: Vec<Skill>, config: &Config) {
        let layout = WheelLayout::new(skills.len(), &config.wheel);
        self.skills = skills;
        self.anchor = config.anchor;
        self.margin = config.margin;
        self.hover = None;
        self.animator.relayout(layout);
        self.recenter(None);
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
        if height > 0.0 {
            self.scale_factor = height / REFERENCE_HEIGHT;
        }
        if self.anchor != Anchor::Cursor || self.center == Point::default() {
            self.recenter(None);
        }
    }

    /// Called whenever the window is shown.
    pub fn show_at(&mut self, cursor: Option<Point>) {
        self.hover = None;
        self.last_frame = None;
        self.recenter(cursor);
    }

    fn recenter(&mut self, cursor: Option<Point>) {
        let (w, h) = self.viewport;
        let m = self.margin * self.scale_factor;
        self.center = match self.anchor {
            Anchor::Cursor => cursor.unwrap_or(Point::new(w / 2.0, h / 2.0)),
            Anchor::Center => Point::new(w / 2.0, h / 2.0),
            Anchor::TopLeft => Point::new(m, m),
            Anchor::TopRight => Point::new(w - m, m),
            Anchor::BottomLeft => Point::new(m, h - m),
            Anchor::BottomRight => Point::new(w - m, h - m),
        };
    }

    /// Runs a wheel command. Returns whether a redraw is needed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Toggle => {
                self.animator.toggle();
                true
            }
            Command::SetState(state) => self.animator.set_state(state),
            Command::Rotate { direction, steps } => self.animator.rotate(direction, steps),
            Command::Select(id) => match self.animator.select(id) {
                Some(plan) => !plan.is_noop(),
                None => {
                    log::warn!("No skill {} to select ({} configured)", id, self.skills.len());
                    false
                }
            },
            Command::Show | Command::Hide => false,
        }
    }

    /// Advances the animation to the frame clock time (microseconds).
    /// Returns whether this frame changed anything.
    pub fn frame(&mut self, frame_time: i64) -> bool {
        let dt = self
            .last_frame
            .map(|prev| Duration::from_micros(frame_time.saturating_sub(prev).max(0) as u64))
            .unwrap_or_default();
        self.last_frame = Some(frame_time);

        let was_animating = self.animator.is_animating();
        let animating = self.animator.advance(dt);
        if !animating {
            self.pause_clock();
        }
        animating || was_animating
    }

    /// Whether the frame clock should keep delivering ticks.
    pub fn wants_frames(&self, visible: bool) -> bool {
        visible && self.animator.is_animating()
    }

    /// Forgets the last frame time so the next animation starts with `dt = 0`.
    pub fn pause_clock(&mut self) {
        self.last_frame = None;
    }

    pub fn geometries(&self) -> Vec<IconGeometry> {
        self.animator
            .visuals()
            .into_iter()
            .map(|v| IconGeometry {
                id: v.id,
                center: v.offset.to_screen(self.center, self.scale_factor),
                radius: SKILL_RADIUS * v.scale * self.scale_factor,
                scale: v.scale,
                alpha: v.alpha,
            })
            .collect()
    }

    /// Topmost target under `point`. Larger icons are drawn last so they win.
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        let skill = self
            .geometries()
            .into_iter()
            .filter(|g| g.center.distance(point) <= g.radius)
            .max_by(|a, b| a.scale.total_cmp(&b.scale))
            .map(|g| Hit::Skill(g.id));

        skill.or_else(|| {
            (self.center.distance(point) <= HUB_RADIUS * self.scale_factor).then_some(Hit::Hub)
        })
    }

    pub fn update_cursor(&mut self, cursor: Point) -> bool {
        let hover = match self.hit_test(cursor) {
            Some(Hit::Skill(id)) => Some(id),
            _ => None,
        };
        let changed = self.hover != hover;
        self.hover = hover;
        changed
    }

    pub fn highlighted_skill(&self) -> Option<&Skill> {
        self.animator
            .highlighted()
            .and_then(|id| self.skills.get(id.index()))
    }
}
