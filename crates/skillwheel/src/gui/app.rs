use crate::config;
use crate::events::AppEvent;
use crate::gui::icons;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, State};
use crate::gui::window;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit::{Command, Point, RotationDirection, SkillId};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    /// Installed only while the wheel is visible and animating.
    tick: Option<gtk::TickCallbackId>,
}

#[derive(Debug)]
pub enum AppMsg {
    Command(Command),
    Press { button: u32, point: Point },
    CursorMove(Point),
    Resize(i32, i32),
    /// Frame clock time in microseconds.
    Frame(i64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Command(c) => AppMsg::Command(c),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Keyboard shortcuts while the wheel has focus.
pub fn command_for_key(key: gdk::Key) -> Option<Command> {
    let rotate = |direction| Command::Rotate {
        direction,
        steps: 1,
    };

    if key == gdk::Key::Escape {
        Some(Command::Hide)
    } else if key == gdk::Key::Left {
        Some(rotate(RotationDirection::Left))
    } else if key == gdk::Key::Right {
        Some(rotate(RotationDirection::Right))
    } else if [gdk::Key::space, gdk::Key::Return, gdk::Key::KP_Enter].contains(&key) {
        Some(Command::Toggle)
    } else {
        key.to_unicode()
            .and_then(|c| c.to_digit(10))
            .filter(|&d| d > 0)
            .map(|d| Command::Select(SkillId::from(d as usize - 1)))
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Skill Wheel"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "skillwheel-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match command_for_key(key) {
                        Some(command) => {
                            sender.input(AppMsg::Command(command));
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "skillwheel-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // Listen to all buttons
                    connect_released[sender] => move |gesture, _, x, y| {
                        sender.input(AppMsg::Press {
                            button: gesture.current_button(),
                            point: Point::new(x, y),
                        });
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            tick: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = wheel::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);
        model.sync_ticking(&sender);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        self.handle(msg);
        self.sync_ticking(&sender);
    }
}

impl AppModel {
    fn handle(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::Command(command) => self.run_command(command),
            AppMsg::Press { button, point } => {
                if !self.visible {
                    return;
                }
                match button {
                    1 => {
                        let hit = self.state.borrow().hit_test(point);
                        match hit {
                            Some(hit) => self.run_command(hit.command()),
                            None => self.run_command(Command::Hide),
                        }
                    }
                    3 => self.run_command(Command::Hide),
                    _ => {}
                }
            }
            AppMsg::CursorMove(point) => {
                if !self.visible {
                    return;
                }
                if self.state.borrow_mut().update_cursor(point) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Resize(width, height) => {
                self.state
                    .borrow_mut()
                    .set_viewport(width as f64, height as f64);
                self.drawing_area.queue_draw();
            }
            AppMsg::Frame(frame_time) => {
                if self.visible && self.state.borrow_mut().frame(frame_time) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let new_config = new_config.with_fallback_skills();
                    icons::clear_cache();
                    let skills = State::init_skills(&new_config);
                    self.state.borrow_mut().reload(skills, &new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    /// Adds the frame tick when an animation starts and drops it once idle.
    fn sync_ticking(&mut self, sender: &ComponentSender<Self>) {
        let wanted = self.state.borrow().wants_frames(self.visible);
        match (wanted, self.tick.take()) {
            (true, None) => {
                let sender = sender.clone();
                let id = self.drawing_area.add_tick_callback(move |_, clock| {
                    sender.input(AppMsg::Frame(clock.frame_time()));
                    glib::ControlFlow::Continue
                });
                self.tick = Some(id);
            }
            (true, Some(id)) => self.tick = Some(id),
            (false, Some(id)) => {
                id.remove();
                self.state.borrow_mut().pause_clock();
            }
            (false, None) => {}
        }
    }

    fn run_command(&mut self, command: Command) {
        log::debug!("Command: {}", command);
        match command {
            Command::Show => self.show(),
            Command::Hide => self.visible = false,
            other => {
                if self.state.borrow_mut().apply(other) {
                    self.drawing_area.queue_draw();
                }
            }
        }
    }

    fn show(&mut self) {
        self.visible = true;
        let cursor = window::get_cursor_position(&self.root);
        self.state.borrow_mut().show_at(cursor);
        self.drawing_area.queue_draw();
    }
}
