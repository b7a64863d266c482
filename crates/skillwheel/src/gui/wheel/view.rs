use super::model::{IconGeometry, Skill, State};
use super::{
    DETAIL_FONT_SIZE, DETAIL_GAP, HUB_RADIUS, ICON_FILL, ICON_SIZE, PANEL_PADDING, SKILL_RADIUS,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

/// Alpha below which a panel is not drawn at all.
const VISIBLE_ALPHA: f64 = 0.01;

fn set_source(cr: &Context, color: Srgba<f64>, alpha: f64) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * alpha);
}

struct SkillRenderer<'a> {
    skill: &'a Skill,
    geometry: &'a IconGeometry,
    hovered: bool,
    highlighted: bool,
}

impl<'a> SkillRenderer<'a> {
    fn new(skill: &'a Skill, geometry: &'a IconGeometry, hovered: bool, highlighted: bool) -> Self {
        Self {
            skill,
            geometry,
            hovered,
            highlighted,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr, colors)?;
        self.draw_content(cr, colors)?;
        Ok(())
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = SkillState::resolve(self.hovered, self.highlighted).color(colors);
        set_source(cr, color, self.geometry.alpha);
        cr.arc(
            self.geometry.center.x,
            self.geometry.center.y,
            self.geometry.radius,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        match &self.skill.pixbuf {
            Some(pixbuf) => self.draw_icon(cr, pixbuf),
            None => self.draw_text(cr, colors, self.skill.name.as_str()),
        }
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let icon_scale = (self.geometry.radius * 2.0 * ICON_FILL) / ICON_SIZE as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );
        let (ix, iy) = (
            self.geometry.center.x - iw / 2.0,
            self.geometry.center.y - ih / 2.0,
        );

        cr.save()?;
        cr.translate(ix, iy);
        cr.scale(icon_scale, icon_scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint_with_alpha(self.geometry.alpha)?;
        cr.restore()
    }

    fn draw_text(&self, cr: &Context, colors: &ThemeColors, text: &str) -> Result<(), cairo::Error> {
        set_source(cr, colors.text, self.geometry.alpha);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(12.0 * self.geometry.radius / SKILL_RADIUS);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(
                self.geometry.center.x - ext.width() / 2.0 - ext.x_bearing(),
                self.geometry.center.y + ext.height() / 2.0,
            );
            cr.show_text(text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillState {
    Hovered,
    Highlighted,
    Idle,
}

impl SkillState {
    fn resolve(hovered: bool, highlighted: bool) -> Self {
        if hovered {
            Self::Hovered
        } else if highlighted {
            Self::Highlighted
        } else {
            Self::Idle
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Hovered => colors.hovered,
            Self::Highlighted => colors.highlighted,
            Self::Idle => colors.default,
        }
    }
}

pub fn draw(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let panels = state.animator.panels();
    draw_base_panel(cr, state, colors, panels.base)?;
    draw_hub(cr, state, colors)?;

    let highlighted = state.animator.highlighted();
    let mut geometries = state.geometries();
    // biggest last, so the highlighted icon sits on top
    geometries.sort_by(|a, b| a.scale.total_cmp(&b.scale));

    for geometry in &geometries {
        if let Some(skill) = state.skills.get(geometry.id.index()) {
            SkillRenderer::new(
                skill,
                geometry,
                state.hover == Some(geometry.id),
                highlighted == Some(geometry.id),
            )
            .draw(cr, colors)?;
        }
    }

    draw_detail_panel(cr, state, colors, panels.detail)
}

fn draw_base_panel(
    cr: &Context,
    state: &State,
    colors: &ThemeColors,
    alpha: f64,
) -> Result<(), cairo::Error> {
    if alpha < VISIBLE_ALPHA || state.skills.is_empty() {
        return Ok(());
    }
    let radius = (state.animator.pose().radius + SKILL_RADIUS + PANEL_PADDING) * state.scale_factor;
    set_source(cr, colors.panel, alpha);
    cr.arc(state.center.x, state.center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_hub(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.hub, 1.0);
    cr.arc(
        state.center.x,
        state.center.y,
        HUB_RADIUS * state.scale_factor,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}

/// Name of the highlighted skill in a rounded box under the hub.
fn draw_detail_panel(
    cr: &Context,
    state: &State,
    colors: &ThemeColors,
    alpha: f64,
) -> Result<(), cairo::Error> {
    let Some(skill) = state.highlighted_skill() else {
        return Ok(());
    };
    if alpha < VISIBLE_ALPHA {
        return Ok(());
    }

    let s = state.scale_factor;
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(DETAIL_FONT_SIZE * s);
    let ext = cr.text_extents(skill.name.as_str())?;

    let (pad_x, pad_y) = (12.0 * s, 6.0 * s);
    let (w, h) = (ext.width() + pad_x * 2.0, ext.height() + pad_y * 2.0);
    let x = state.center.x - w / 2.0;
    let y = state.center.y + (HUB_RADIUS + DETAIL_GAP) * s;

    rounded_rect(cr, x, y, w, h, h / 2.0);
    set_source(cr, colors.panel, alpha);
    cr.fill()?;

    set_source(cr, colors.text, alpha);
    cr.move_to(x + pad_x - ext.x_bearing(), y + pad_y - ext.y_bearing());
    cr.show_text(skill.name.as_str())
}

fn rounded_rect(cr: &Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}
