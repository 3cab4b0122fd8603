use crate::config;
use crate::events::AppEvent;
use crate::gui::input::PointerListeners;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, WHEEL_SIZE, WheelState, motion};
use detent::{Bounds, Transition, Update};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<WheelState>>,
    pub drawing_area: gtk::DrawingArea,
    listeners: Option<PointerListeners>,
}

#[derive(Debug)]
pub enum AppMsg {
    Advance,
    Reduce,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (WheelState, String, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Chord Wheel"),
            set_default_size: (WHEEL_SIZE + 48, WHEEL_SIZE + 160),
            add_css_class: "chordwheel-window",

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 32,
                set_margin_all: 24,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: WHEEL_SIZE,
                    set_content_height: WHEEL_SIZE,
                    set_hexpand: true,
                    set_vexpand: true,
                    set_cursor_from_name: Some("pointer"),
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_halign: gtk::Align::Center,
                    set_spacing: 16,

                    gtk::Button {
                        set_label: "-1",
                        add_css_class: "chordwheel-step",
                        connect_clicked => AppMsg::Reduce,
                    },

                    gtk::Button {
                        set_label: "+1",
                        add_css_class: "chordwheel-step",
                        connect_clicked => AppMsg::Advance,
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, stylesheet, rx) = init;

        theme::load_css(&stylesheet);

        let state = Rc::new(RefCell::new(state));

        let widgets = view_output!();

        let state_draw = state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let bounds = Bounds::new(0.0, 0.0, width as f64, height as f64);
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let geometry = state_draw.borrow().geometry(bounds);
                if let Err(e) = wheel::draw(cr, &geometry, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let listeners = match PointerListeners::install(&root, &widgets.drawing_area, state.clone())
        {
            Ok(l) => Some(l),
            Err(e) => {
                log::error!("Wheel stays static: {}", e);
                None
            }
        };

        let model = AppModel {
            state,
            drawing_area: widgets.drawing_area.clone(),
            listeners,
        };

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Advance => {
                let update = self.state.borrow_mut().advance();
                self.after_step(update);
            }
            AppMsg::Reduce => {
                let update = self.state.borrow_mut().reduce();
                self.after_step(update);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().reconfigure(&new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.listeners.take();
    }
}

impl AppModel {
    fn after_step(&self, update: Update) {
        if update.transition == Transition::None {
            log::debug!("Step ignored during drag");
            return;
        }
        motion::present(&self.drawing_area, &self.state, update.transition);
        log::info!(
            "Position {} shows {}",
            update.state.position(),
            self.state.borrow().describe_visible()
        );
    }
}
