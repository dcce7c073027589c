use crate::config;
use crate::events::AppEvent;
use crate::gui::pad::{self, DragState, IconCache, LongPressTimer};
use crate::gui::theme;
use dpad::config::ColorDefaults;
use dpad::{DPad, DPadEvent, Drawable, TouchAction, TouchClassifiable, TouchResult, TouchSample};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

pub struct AppInit {
    pub config_path: PathBuf,
    pub size: i32,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub dpad: Rc<RefCell<DPad>>,
    pub icons: Rc<RefCell<IconCache>>,
    pub config_path: PathBuf,
    pub color_defaults: ColorDefaults,
    pub status: String,
    pub long_press: LongPressTimer,
    pub drag: DragState,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Touch(TouchSample),
    LongPressTimeout,
    ApplyConfig,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ApplyConfig,
        }
    }
}

fn sample_at(gesture: &gtk::GestureDrag, dx: f64, dy: f64, action: TouchAction) -> Option<AppMsg> {
    gesture
        .start_point()
        .map(|(x, y)| AppMsg::Touch(TouchSample::new(x + dx, y + dy, action, Instant::now())))
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("D-Pad"),

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 20,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: size,
                    set_content_height: size,
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "dpad-drawing-area",

                    add_controller = gtk::GestureDrag {
                        set_button: 0, // any button, and touch
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::Touch(TouchSample::new(
                                x,
                                y,
                                TouchAction::Down,
                                Instant::now(),
                            )));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some(msg) = sample_at(gesture, dx, dy, TouchAction::Move) {
                                sender.input(msg);
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some(msg) = sample_at(gesture, dx, dy, TouchAction::Up) {
                                sender.input(msg);
                            }
                        },
                        connect_cancel[sender] => move |gesture, _| {
                            let (dx, dy) = gesture.offset().unwrap_or_default();
                            if let Some(msg) = sample_at(gesture, dx, dy, TouchAction::Cancel) {
                                sender.input(msg);
                            }
                        },
                    }
                },

                gtk::Label {
                    #[watch]
                    set_label: &model.status,
                    set_xalign: 0.0,
                    add_css_class: "dpad-status",
                },

                gtk::Button {
                    set_label: "Apply",
                    connect_clicked => AppMsg::ApplyConfig,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config_path,
            size,
            rx,
        } = init;

        theme::load_css();

        let model = AppModel {
            dpad: Rc::new(RefCell::new(DPad::default())),
            icons: Rc::new(RefCell::new(IconCache::default())),
            config_path,
            color_defaults: ColorDefaults::default(),
            status: String::new(),
            long_press: LongPressTimer::default(),
            drag: DragState::default(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.color_defaults = theme::color_defaults(&widgets.drawing_area.style_context());
        model.apply_settings();

        let dpad_layout = model.dpad.clone();
        widgets.drawing_area.connect_resize(move |_, width, height| {
            dpad_layout
                .borrow_mut()
                .layout(f64::from(width), f64::from(height));
        });

        let dpad_draw = model.dpad.clone();
        let icons = model.icons.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            let commands = dpad_draw.borrow().render();
            if let Err(e) = pad::draw(cr, &commands, &mut icons.borrow_mut()) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Touch(sample) => {
                if !self.drag.accept(sample.action) {
                    log::trace!("Dropping {} after cancelled drag", sample.action);
                    return;
                }
                let result = self.dpad.borrow_mut().on_touch(sample);
                self.handle_touch(result);
                self.sync_long_press(&sender);
                self.drawing_area.queue_draw();
            }
            AppMsg::LongPressTimeout => {
                let event = self.dpad.borrow_mut().poll_long_press(Instant::now());
                if let Some(event) = event {
                    self.report(event);
                }
                self.sync_long_press(&sender);
                self.drawing_area.queue_draw();
            }
            AppMsg::ApplyConfig => self.apply_settings(),
        }
    }
}

impl AppModel {
    fn apply_settings(&mut self) {
        let resolved = config::load_or_default(&self.config_path).resolve(&self.color_defaults);
        let applied = self.dpad.borrow_mut().apply_config(resolved);
        match applied {
            Ok(()) => {
                self.icons.borrow_mut().clear();
                self.drawing_area.queue_draw();
                log::info!("Configuration applied from {}", self.config_path.display());
            }
            Err(e) => log::error!("Rejected configuration: {}", e),
        }
    }

    fn handle_touch(&mut self, result: TouchResult) {
        if result.perform_click {
            log::info!("Click");
        }
        if result.haptic_feedback {
            log::debug!("Haptic feedback: keyboard tap");
        }
        for event in result.events {
            self.report(event);
        }
    }

    fn report(&mut self, event: DPadEvent) {
        match event {
            DPadEvent::DirectionClick(zone) => log::info!("Direction click: {}", zone),
            DPadEvent::CenterLongPress => log::info!("Center long press"),
            DPadEvent::DirectionPress { .. } => {}
        }
        if let Some(status) = pad::describe(&event) {
            self.status = status;
        }
    }

    fn sync_long_press(&mut self, sender: &ComponentSender<Self>) {
        let deadline = self.dpad.borrow().long_press_deadline();
        let sender = sender.clone();
        self.long_press
            .sync(deadline, move || sender.input(AppMsg::LongPressTimeout));
    }
}
