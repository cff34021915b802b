use iced::widget::{button, canvas, column, container, row, slider, text, Row};
use iced::{event, window, Alignment, Element, Event, Length, Size, Subscription, Task, Theme};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

mod compose;
mod error;
mod io;
mod logging;
mod state;
mod ui;

use compose::{layout, Frame};
use error::{ExportError, LoadError};
use io::{export, loader};
use state::{AspectRatio, DragSession, DropOutcome, Scale, Settings, SlotImage, SlotPosition, SlotStore};
use ui::TriptychCanvas;

const INITIAL_WINDOW_SIZE: Size = Size::new(1000.0, 900.0);

/// Space around the preview reserved for padding, header and controls
const PREVIEW_HORIZONTAL_MARGIN: f32 = 80.0;
const PREVIEW_VERTICAL_MARGIN: f32 = 400.0;

/// Main application state
struct Tryptiq {
    /// Image in each of the three panels
    slots: SlotStore,
    /// Aspect ratio and scale
    settings: Settings,
    /// Set between a press on a filled slot and the matching release
    drag: Option<DragSession>,
    /// Empty slot pressed; a release on the same slot opens the picker
    pending_pick: Option<SlotPosition>,
    /// Slot under the pointer, as last reported by the canvas
    hovered: Option<SlotPosition>,
    /// Slots with a background decode still running
    importing: HashSet<SlotPosition>,
    /// A host file is being dragged over the window
    file_hovering: bool,
    window_size: Size,
    /// Last notable outcome, shown under the controls
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    SlotHovered(Option<SlotPosition>),
    SlotPressed(SlotPosition),
    /// Mouse released after a press on the canvas; `None` outside any slot
    SlotReleased(Option<SlotPosition>),
    RemoveImage(SlotPosition),
    /// Background decode finished for a pick or a host drop
    ImageLoaded {
        slot: SlotPosition,
        generation: u64,
        result: Result<SlotImage, Arc<LoadError>>,
    },
    FileHovered,
    FileHoverLeft,
    FileDropped(PathBuf),
    AspectRatioSelected(AspectRatio),
    ScaleChanged(f64),
    Export,
    ExportComplete(Result<PathBuf, Arc<ExportError>>),
    WindowResized(Size),
}

impl Default for Tryptiq {
    fn default() -> Self {
        Self {
            slots: SlotStore::new(),
            settings: Settings::default(),
            drag: None,
            pending_pick: None,
            hovered: None,
            importing: HashSet::new(),
            file_hovering: false,
            window_size: INITIAL_WINDOW_SIZE,
            status: "Add up to three photos to get started.".to_string(),
        }
    }
}

impl Tryptiq {
    fn new() -> (Self, Task<Message>) {
        info!("Tryptiq started");
        (Self::default(), Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SlotHovered(slot) => {
                self.hovered = slot;
                Task::none()
            }
            Message::SlotPressed(slot) => {
                match self.slots.get(slot) {
                    Some(image) => {
                        debug!("Drag started from {slot} slot ({})", image.name());
                        self.drag = Some(DragSession::from_slot(slot, image.clone()));
                        self.pending_pick = None;
                    }
                    None => {
                        self.drag = None;
                        self.pending_pick = Some(slot);
                    }
                }
                Task::none()
            }
            Message::SlotReleased(target) => {
                let pending_pick = self.pending_pick.take();

                // The drag session ends here no matter how the drop resolves
                match (self.drag.take(), target) {
                    (Some(session), Some(target)) => {
                        if let DropOutcome::Swapped { source, target } = self.slots.drop_onto(target, session) {
                            self.status = format!("Moved {source} image to {target}.");
                        }
                        Task::none()
                    }
                    (Some(_), None) => {
                        debug!("Drag released outside the slots, discarded");
                        Task::none()
                    }
                    (None, Some(target)) if pending_pick == Some(target) => self.pick_into(target),
                    (None, _) => Task::none(),
                }
            }
            Message::RemoveImage(slot) => {
                if let Some(image) = self.slots.get(slot) {
                    info!("Removed {} from {slot} slot", image.name());
                }
                self.slots.clear(slot);
                Task::none()
            }
            Message::ImageLoaded { slot, generation, result } => {
                self.importing.remove(&slot);
                match result {
                    Ok(image) => {
                        let name = image.name().to_string();
                        if self.slots.apply_import(slot, generation, image).is_some() {
                            self.status = format!("Added {name} to the {} panel.", slot);
                        }
                    }
                    Err(e) => {
                        // Decode failures leave the slot untouched and stay quiet in the UI
                        warn!("Import into {slot} slot failed: {e}");
                    }
                }
                Task::none()
            }
            Message::FileHovered => {
                self.file_hovering = true;
                Task::none()
            }
            Message::FileHoverLeft => {
                self.file_hovering = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.file_hovering = false;
                if !loader::is_supported(&path) {
                    warn!("Ignoring dropped file with unsupported type: {}", path.display());
                    return Task::none();
                }
                let target = self.drop_target();
                info!("External drop of {} onto {target} slot", path.display());
                self.load_into(target, path)
            }
            Message::AspectRatioSelected(aspect_ratio) => {
                self.settings.aspect_ratio = aspect_ratio;
                Task::none()
            }
            Message::ScaleChanged(value) => {
                self.settings.scale = Scale::new(value);
                Task::none()
            }
            Message::Export => self.export(),
            Message::ExportComplete(result) => {
                match result {
                    Ok(path) => {
                        self.status = format!("Exported to {}", path.display());
                    }
                    Err(e) => {
                        error!("Export failed: {e}");
                        self.status = format!("Export failed: {e}");
                    }
                }
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                Task::none()
            }
        }
    }

    /// Slot a host file drop lands in: the one under the pointer, else the
    /// first empty one, else the center.
    ///
    /// Slots already waiting on a decode are skipped so that several files
    /// dropped together fill consecutive slots instead of racing for one.
    fn drop_target(&self) -> SlotPosition {
        let free = |slot: &SlotPosition| !self.importing.contains(slot);
        self.hovered
            .filter(free)
            .or_else(|| {
                SlotPosition::ALL
                    .into_iter()
                    .find(|slot| free(slot) && self.slots.get(*slot).is_none())
            })
            .or(self.hovered)
            .unwrap_or(SlotPosition::Center)
    }

    fn pick_into(&mut self, slot: SlotPosition) -> Task<Message> {
        match loader::pick_image() {
            Some(path) => self.load_into(slot, path),
            None => Task::none(),
        }
    }

    /// Decode `path` in the background and import it into `slot` when done
    fn load_into(&mut self, slot: SlotPosition, path: PathBuf) -> Task<Message> {
        let generation = self.slots.generation(slot);
        self.importing.insert(slot);
        Task::perform(loader::load_image(path), move |result| Message::ImageLoaded {
            slot,
            generation,
            result: result.map_err(Arc::new),
        })
    }

    fn export(&mut self) -> Task<Message> {
        let frame = match Frame::capture(&self.slots, self.settings) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("{e}");
                self.status = "Nothing to export yet.".to_string();
                return Task::none();
            }
        };

        let Some(path) = export::choose_export_path() else {
            debug!("Export cancelled");
            return Task::none();
        };

        self.status = format!("Exporting to {}...", path.display());
        Task::perform(export::export_triptych(frame, path), |result| {
            Message::ExportComplete(result.map_err(Arc::new))
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let (preview_width, preview_height) = layout::preview_size(
            f64::from(self.window_size.width - PREVIEW_HORIZONTAL_MARGIN),
            f64::from(self.window_size.height - PREVIEW_VERTICAL_MARGIN),
            self.settings.aspect_ratio,
        );

        let preview = canvas(TriptychCanvas {
            slots: &self.slots,
            settings: self.settings,
            file_hovering: self.file_hovering,
        })
        .width(Length::Fixed(preview_width as f32))
        .height(Length::Fixed(preview_height as f32));

        let ratios = AspectRatio::ALL.into_iter().fold(Row::new().spacing(4), |ratios, ratio| {
            let style: fn(&Theme, button::Status) -> button::Style = if ratio == self.settings.aspect_ratio {
                button::primary
            } else {
                button::secondary
            };
            ratios.push(
                button(text(ratio.label()).size(13))
                    .on_press(Message::AspectRatioSelected(ratio))
                    .style(style)
                    .padding([6, 18]),
            )
        });

        let scale = row![
            text("0.5x").size(12),
            slider(Scale::MIN..=Scale::MAX, self.settings.scale.get(), Message::ScaleChanged)
                .step(Scale::STEP)
                .width(200),
            text("2.0x").size(12),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        let export_button = button(text("Export Triptych").size(14))
            .padding([12, 28])
            .on_press_maybe((!self.slots.is_empty()).then_some(Message::Export));

        let content = column![
            text("Tryptiq").size(32),
            text("Create beautiful triptychs from your photos").size(14),
            preview,
            text("Canvas Aspect Ratio").size(14),
            ratios,
            text("Image Scale").size(14),
            scale,
            text(self.settings.scale.to_string()).size(12),
            export_button,
            text(&self.status).size(12),
        ]
        .spacing(16)
        .padding(30)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FileHoverLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    logging::setup_logger();

    iced::application("Tryptiq", Tryptiq::update, Tryptiq::view)
        .subscription(Tryptiq::subscription)
        .theme(Tryptiq::theme)
        .window_size(INITIAL_WINDOW_SIZE)
        .centered()
        .run_with(Tryptiq::new)
}
