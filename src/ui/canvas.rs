use iced::alignment;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Path, Program, Stroke, Text};
use iced::{Color, Pixels, Point, Rectangle, Renderer, Size, Theme};

use crate::compose::{CanvasLayout, Rect};
use crate::state::{Settings, SlotPosition, SlotStore};
use crate::Message;

const EMPTY_FILL: Color = Color::from_rgba(0.5, 0.5, 0.5, 0.05);
const EMPTY_FILL_HOVER: Color = Color::from_rgba(0.5, 0.5, 0.5, 0.15);
const DROP_HIGHLIGHT: Color = Color::from_rgba(0.0, 0.48, 1.0, 0.6);
const REMOVE_BADGE: Color = Color::from_rgb(0.9, 0.2, 0.2);
const REMOVE_BADGE_RADIUS: f32 = 10.0;

/// Live preview of the triptych
///
/// Draws with the same `CanvasLayout` the exporter uses, so placement on
/// screen matches the exported file. Also turns pointer input into slot
/// messages: press/release for rearranging, hover for drop highlighting.
pub struct TriptychCanvas<'a> {
    pub slots: &'a SlotStore,
    pub settings: Settings,
    /// A file from the host is hovering over the window
    pub file_hovering: bool,
}

/// Pointer bookkeeping local to the canvas widget
#[derive(Debug, Default)]
pub struct PointerState {
    hovered: Option<SlotPosition>,
    pressed: Option<SlotPosition>,
}

impl TriptychCanvas<'_> {
    fn layout(bounds: Rectangle) -> CanvasLayout {
        CanvasLayout::new(f64::from(bounds.width), f64::from(bounds.height))
    }

    fn slot_under(bounds: Rectangle, cursor: Cursor) -> Option<SlotPosition> {
        let position = cursor.position_in(bounds)?;
        Self::layout(bounds).slot_at(f64::from(position.x), f64::from(position.y))
    }

    /// Center of the remove control in the slot's top-right corner
    fn remove_badge_center(slot: SlotPosition, column: Rect) -> Point {
        let trailing = match slot {
            SlotPosition::Right => 10.0,
            SlotPosition::Left | SlotPosition::Center => 6.0,
        };
        Point::new(
            (column.x + column.width) as f32 - trailing - REMOVE_BADGE_RADIUS,
            column.y as f32 + 12.0 + REMOVE_BADGE_RADIUS,
        )
    }

    fn over_remove_badge(&self, bounds: Rectangle, cursor: Cursor, slot: SlotPosition) -> bool {
        if self.slots.get(slot).is_none() {
            return false;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return false;
        };
        let column = Self::layout(bounds).slot_rect(slot);
        Self::remove_badge_center(slot, column).distance(position) <= REMOVE_BADGE_RADIUS
    }

    /// Is something droppable hovering over `slot` right now?
    fn is_drop_target(&self, state: &PointerState, slot: SlotPosition) -> bool {
        if state.hovered != Some(slot) {
            return false;
        }
        // A press on an empty slot is a pending pick, not a drag
        self.file_hovering
            || state
                .pressed
                .is_some_and(|source| source != slot && self.slots.get(source).is_some())
    }
}

fn to_rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x as f32, rect.y as f32),
        Size::new(rect.width as f32, rect.height as f32),
    )
}

impl Program<Message> for TriptychCanvas<'_> {
    type State = PointerState;

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);

        let layout = Self::layout(bounds);

        for slot in SlotPosition::ALL {
            let column = to_rectangle(layout.slot_rect(slot));
            let drop_target = self.is_drop_target(state, slot);

            match self.slots.get(slot) {
                Some(image) => {
                    if let Some(placement) =
                        layout.place(slot, image.width(), image.height(), self.settings.scale)
                    {
                        let placement = to_rectangle(placement);
                        // with_clip translates the origin to the column's corner
                        frame.with_clip(column, |frame| {
                            let local = Rectangle::new(
                                Point::new(placement.x - column.x, placement.y - column.y),
                                placement.size(),
                            );
                            frame.draw_image(local, image.preview());
                        });
                    }

                    if state.hovered == Some(slot) && state.pressed.is_none() {
                        let center = Self::remove_badge_center(slot, layout.slot_rect(slot));
                        frame.fill(&Path::circle(center, REMOVE_BADGE_RADIUS), REMOVE_BADGE);
                        frame.fill_text(Text {
                            content: "×".to_string(),
                            position: center,
                            color: Color::WHITE,
                            size: Pixels(14.0),
                            horizontal_alignment: alignment::Horizontal::Center,
                            vertical_alignment: alignment::Vertical::Center,
                            ..Text::default()
                        });
                    }
                }
                None => {
                    let fill = if drop_target { EMPTY_FILL_HOVER } else { EMPTY_FILL };
                    frame.fill_rectangle(column.position(), column.size(), fill);

                    let center = column.center();
                    frame.fill_text(Text {
                        content: slot.label().to_string(),
                        position: Point::new(center.x, center.y - 8.0),
                        color: Color::from_rgba(0.5, 0.5, 0.5, 0.6),
                        size: Pixels(11.0),
                        horizontal_alignment: alignment::Horizontal::Center,
                        vertical_alignment: alignment::Vertical::Center,
                        ..Text::default()
                    });
                    frame.fill_text(Text {
                        content: "Click to select or drop image here".to_string(),
                        position: Point::new(center.x, center.y + 8.0),
                        color: Color::from_rgba(0.5, 0.5, 0.5, 0.4),
                        size: Pixels(9.0),
                        horizontal_alignment: alignment::Horizontal::Center,
                        vertical_alignment: alignment::Vertical::Center,
                        ..Text::default()
                    });
                }
            }

            if drop_target {
                frame.stroke(
                    &Path::rectangle(column.position(), column.size()),
                    Stroke::default().with_color(DROP_HIGHLIGHT).with_width(2.0),
                );
            }
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let canvas::Event::Mouse(event) = event else {
            return (canvas::event::Status::Ignored, None);
        };

        match event {
            mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft => {
                let hovered = Self::slot_under(bounds, cursor);
                if hovered != state.hovered {
                    state.hovered = hovered;
                    return (canvas::event::Status::Captured, Some(Message::SlotHovered(hovered)));
                }
                (canvas::event::Status::Ignored, None)
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let Some(slot) = Self::slot_under(bounds, cursor) else {
                    return (canvas::event::Status::Ignored, None);
                };
                if self.over_remove_badge(bounds, cursor, slot) {
                    return (canvas::event::Status::Captured, Some(Message::RemoveImage(slot)));
                }
                state.pressed = Some(slot);
                (canvas::event::Status::Captured, Some(Message::SlotPressed(slot)))
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                // Only releases that finish a press made on this canvas count
                if state.pressed.take().is_none() {
                    return (canvas::event::Status::Ignored, None);
                }
                let target = Self::slot_under(bounds, cursor);
                (canvas::event::Status::Captured, Some(Message::SlotReleased(target)))
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(&self, state: &Self::State, bounds: Rectangle, cursor: Cursor) -> mouse::Interaction {
        if state.pressed.is_some() {
            return mouse::Interaction::Grabbing;
        }
        match Self::slot_under(bounds, cursor) {
            Some(slot) if self.over_remove_badge(bounds, cursor, slot) => mouse::Interaction::Pointer,
            Some(slot) if self.slots.get(slot).is_some() => mouse::Interaction::Grab,
            Some(_) => mouse::Interaction::Pointer,
            None => mouse::Interaction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SlotImage;
    use image::{DynamicImage, RgbaImage};

    fn canvas(slots: &SlotStore) -> TriptychCanvas<'_> {
        TriptychCanvas { slots, settings: Settings::default(), file_hovering: false }
    }

    #[test]
    fn test_dragging_an_image_highlights_other_slot() {
        let mut slots = SlotStore::new();
        slots.set(SlotPosition::Left, Some(SlotImage::new("a", DynamicImage::ImageRgba8(RgbaImage::new(4, 4)))));
        let state = PointerState { hovered: Some(SlotPosition::Right), pressed: Some(SlotPosition::Left) };

        assert!(canvas(&slots).is_drop_target(&state, SlotPosition::Right));
        assert!(!canvas(&slots).is_drop_target(&state, SlotPosition::Center));
    }

    #[test]
    fn test_press_on_empty_slot_highlights_nothing() {
        let slots = SlotStore::new();
        let state = PointerState { hovered: Some(SlotPosition::Right), pressed: Some(SlotPosition::Left) };

        assert!(!canvas(&slots).is_drop_target(&state, SlotPosition::Right));
    }

    #[test]
    fn test_host_file_hover_highlights_hovered_slot() {
        let slots = SlotStore::new();
        let program = TriptychCanvas { slots: &slots, settings: Settings::default(), file_hovering: true };
        let state = PointerState { hovered: Some(SlotPosition::Center), pressed: None };

        assert!(program.is_drop_target(&state, SlotPosition::Center));
        assert!(!program.is_drop_target(&state, SlotPosition::Left));
    }
}
