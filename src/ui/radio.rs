/// Canvas-drawn radio button
///
/// An outlined circle with a filled dot when selected and a label to its
/// right. Clicking the circle or the label emits the button's message.
use iced::alignment;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Frame, Path, Program, Stroke, Text};
use iced::{Color, Pixels, Point, Rectangle, Renderer, Theme};

/// Outer circle radius
pub const RADIUS: f32 = 10.0;
/// The selection dot is this much smaller than the outer circle
pub const DOT_INSET: f32 = 4.0;
/// Label font size
pub const LABEL_SIZE: f32 = 20.0;

/// True when `point` lies inside (or on) the circle
pub fn hit_circle(center: Point, radius: f32, point: Point) -> bool {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy <= radius * radius
}

pub struct RadioButton<Message> {
    pub label: String,
    pub selected: bool,
    pub color: Color,
    /// Emitted when the button is clicked
    pub on_select: Message,
}

impl<Message> RadioButton<Message> {
    pub fn new(label: impl Into<String>, selected: bool, color: Color, on_select: Message) -> Self {
        Self {
            label: label.into(),
            selected,
            color,
            on_select,
        }
    }

    /// Circle centre inside a canvas of the given bounds
    fn center(bounds: Rectangle) -> Point {
        Point::new(RADIUS + 1.0, bounds.height / 2.0)
    }

    /// Where the label starts
    fn label_x() -> f32 {
        1.0 + 3.0 * RADIUS
    }

    /// Does a click at `point` (relative to the canvas) select the button?
    fn is_hit(bounds: Rectangle, point: Point) -> bool {
        hit_circle(Self::center(bounds), RADIUS, point) || point.x >= Self::label_x()
    }
}

impl<Message: Clone> Program<Message> for RadioButton<Message> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        if let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(point) = cursor.position_in(bounds) {
                if Self::is_hit(bounds, point) {
                    return (canvas::event::Status::Captured, Some(self.on_select.clone()));
                }
            }
        }

        (canvas::event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = Self::center(bounds);

        frame.stroke(
            &Path::circle(center, RADIUS),
            Stroke::default().with_color(self.color).with_width(1.5),
        );

        if self.selected {
            frame.fill(&Path::circle(center, RADIUS - DOT_INSET), self.color);
        }

        frame.fill_text(Text {
            content: self.label.clone(),
            position: Point::new(Self::label_x(), center.y),
            color: self.color,
            size: Pixels(LABEL_SIZE),
            vertical_alignment: alignment::Vertical::Center,
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(point) if Self::is_hit(bounds, point) => mouse::Interaction::Pointer,
            _ => mouse::Interaction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;

    fn bounds() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(220.0, 28.0))
    }

    #[test]
    fn test_hit_circle() {
        let c = Point::new(71.0, 247.0);
        assert!(hit_circle(c, 10.0, c));
        assert!(hit_circle(c, 10.0, Point::new(81.0, 247.0)));
        assert!(hit_circle(c, 10.0, Point::new(77.0, 255.0)));
        assert!(!hit_circle(c, 10.0, Point::new(79.0, 255.0)));
        assert!(!hit_circle(c, 10.0, Point::new(71.0, 257.5)));
    }

    #[test]
    fn test_click_on_circle_or_label() {
        assert!(RadioButton::<()>::is_hit(bounds(), Point::new(11.0, 14.0)));
        assert!(RadioButton::<()>::is_hit(bounds(), Point::new(120.0, 3.0)));
        // gap between circle and label
        assert!(!RadioButton::<()>::is_hit(bounds(), Point::new(26.0, 2.0)));
    }
}
