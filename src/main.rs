use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::Handle;
use iced::widget::{button, canvas, column, container, image, row, text, Column};
use iced::{Background, Border, Color, ContentFit, Element, Length, Size, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::sync::Arc;

mod error;
mod filters;
mod logging;
mod photo;
mod state;
mod ui;

use error::ConverterError;
use filters::FilterKind;
use photo::{preview, validate, LoadedPhoto};
use state::{ConvertedPhoto, Session, Settings};
use ui::RadioButton;

/// Window size; the layout is fixed
const WINDOW_WIDTH: f32 = 1280.0;
const WINDOW_HEIGHT: f32 = 720.0;
const BUTTON_WIDTH: f32 = 160.0;

/// Radio buttons and labels (#102B72)
const INK: Color = rgb8(0x10, 0x2B, 0x72);
/// Preview frame border (#9F71F0)
const FRAME_BORDER: Color = rgb8(0x9F, 0x71, 0xF0);
/// Preview frame fill (#D2CBF5)
const FRAME_BACKGROUND: Color = rgb8(0xD2, 0xCB, 0xF5);

const fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
        a: 1.0,
    }
}

/// Main application state
struct PhotoConverter {
    /// Loaded photo, its conversion and the selected filter
    session: Session,
    /// Persisted between runs
    settings: Settings,
    /// Upload of the preview currently shown in the frame
    preview: Option<Handle>,
    /// A photo is being decoded
    loading: bool,
    /// A conversion is running in the background
    converting: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Upload"
    OpenPhoto,
    /// Background decoding finished
    PhotoLoaded(Result<LoadedPhoto, Arc<ConverterError>>),
    /// User picked a radio button
    SelectFilter(FilterKind),
    /// User clicked "Convert"
    Convert,
    /// Background conversion finished for the given generation
    ConversionDone(u64, Result<ConvertedPhoto, Arc<ConverterError>>),
    /// User clicked "Save"
    Save,
}

impl PhotoConverter {
    /// Create a new instance of the application
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let session = Session::new(settings.last_filter);
        tracing::info!(filter = %session.selected(), "Photo Converter initialized");

        (
            PhotoConverter {
                session,
                settings,
                preview: None,
                loading: false,
                converting: false,
                status: "Ready. Upload a photo to start.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenPhoto => {
                let mut dialog = FileDialog::new()
                    .set_title("Choose a file")
                    .add_filter("Images", &validate::VALID_EXTENSIONS)
                    .add_filter("All files", &["*"]);
                if let Some(dir) = &self.settings.last_open_dir {
                    dialog = dialog.set_directory(dir);
                }

                let Some(path) = dialog.pick_file() else {
                    return Task::none();
                };

                if !validate::check_path_extension(&path) {
                    self.report(&ConverterError::UnsupportedExtension(path));
                    return Task::none();
                }

                self.settings.last_open_dir = path.parent().map(|p| p.to_path_buf());
                self.persist_settings();

                self.loading = true;
                self.status = format!("Loading {}...", path.display());
                Task::perform(photo::load_photo(path), |result| {
                    Message::PhotoLoaded(result.map_err(Arc::new))
                })
            }
            Message::PhotoLoaded(result) => {
                self.loading = false;
                match result {
                    Ok(photo) => {
                        let (w, h) = photo.dimensions();
                        self.status = format!("Loaded {} ({}x{})", photo.path.display(), w, h);
                        self.session.install_source(photo);
                        self.refresh_preview();
                    }
                    Err(e) => self.report(&e),
                }
                Task::none()
            }
            Message::SelectFilter(filter) => {
                self.session.select(filter);
                self.settings.last_filter = filter;
                self.persist_settings();
                Task::none()
            }
            Message::Convert => match self.session.begin_conversion() {
                Ok(job) => {
                    let generation = job.generation;
                    self.converting = true;
                    self.status = format!("Converting with {}...", job.filter);
                    Task::perform(job.run_async(), move |result| {
                        Message::ConversionDone(generation, result.map_err(Arc::new))
                    })
                }
                Err(e) => {
                    self.report(&e);
                    Task::none()
                }
            },
            Message::ConversionDone(generation, result) => {
                self.converting = false;
                match result {
                    Ok(converted) => {
                        let filter = converted.filter;
                        if self.session.finish_conversion(generation, converted) {
                            self.status = format!("Converted with {filter}. Click Save to keep it.");
                            self.refresh_preview();
                        }
                    }
                    Err(e) => self.report(&e),
                }
                Task::none()
            }
            Message::Save => {
                self.save();
                Task::none()
            }
        }
    }

    /// Ask for a destination and write the conversion
    fn save(&mut self) {
        if self.session.converted().is_none() {
            self.report(&ConverterError::NothingToSave);
            return;
        }

        let mut dialog = FileDialog::new()
            .set_title("Save converted image")
            .set_file_name(self.session.suggested_file_name())
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("PNG", &["png"]);
        if let Some(dir) = &self.settings.last_save_dir {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.save_file() else {
            return;
        };

        match self.session.save_converted(&path, self.settings.jpeg_quality) {
            Ok(saved) => {
                self.status = format!("Saved {}", saved.display());
                self.settings.last_save_dir = saved.parent().map(|p| p.to_path_buf());
                self.persist_settings();
            }
            Err(e) => self.report(&e),
        }
    }

    /// Re-upload whatever the session wants on screen
    fn refresh_preview(&mut self) {
        self.preview = self.session.displayed().map(preview::to_handle);
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save() {
            tracing::warn!(error = %e, "Failed to save settings");
        }
    }

    /// Tell the user about an error
    ///
    /// Guards (no photo, nothing converted, wrong extension) are shown as
    /// info dialogs; anything else is logged and shown as an error.
    fn report(&mut self, error: &ConverterError) {
        let (level, title, description) = match error.notice() {
            Some((title, message)) => {
                tracing::warn!(%error, "User action rejected");
                (MessageLevel::Info, title.to_string(), message.to_string())
            }
            None => {
                tracing::error!(%error, "Operation failed");
                self.status = format!("Error: {error}");
                (MessageLevel::Error, "Error".to_string(), error.to_string())
            }
        };

        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(description)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let selected = self.session.selected();
        let radios = Column::with_children(FilterKind::ALL.iter().map(|&filter| {
            canvas(RadioButton::new(
                filter.label(),
                filter == selected,
                INK,
                Message::SelectFilter(filter),
            ))
            .width(Length::Fixed(220.0))
            .height(Length::Fixed(28.0))
            .into()
        }))
        .spacing(16);

        let controls = column![
            action_button("Upload", (!self.loading).then_some(Message::OpenPhoto)),
            radios,
            action_button(
                "Convert",
                (!self.converting && !self.loading).then_some(Message::Convert)
            ),
            action_button("Save", Some(Message::Save)),
        ]
        .spacing(40)
        .width(Length::Fixed(240.0));

        let picture: Element<Message> = match &self.preview {
            Some(handle) => image(handle.clone())
                .content_fit(ContentFit::ScaleDown)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => text("No image loaded").size(20).color(INK).into(),
        };

        let frame = container(picture)
            .center_x(Length::Fixed(preview::FRAME_WIDTH as f32))
            .center_y(Length::Fixed(preview::FRAME_HEIGHT as f32))
            .style(|_theme: &Theme| container::Style {
                background: Some(Background::Color(FRAME_BACKGROUND)),
                border: Border {
                    color: FRAME_BORDER,
                    width: 2.0,
                    radius: 0.0.into(),
                },
                ..container::Style::default()
            });

        let content = row![
            controls,
            column![frame, text(&self.status).size(16).color(INK)].spacing(16),
        ]
        .spacing(60)
        .padding(60);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Left)
            .align_y(Vertical::Top)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Fixed-width button that is disabled when `message` is `None`
fn action_button(label: &str, message: Option<Message>) -> Element<'_, Message> {
    button(text(label).size(18).align_x(Horizontal::Center).width(Length::Fill))
        .on_press_maybe(message)
        .padding(12)
        .width(Length::Fixed(BUTTON_WIDTH))
        .into()
}

fn main() -> iced::Result {
    let (settings, problem) = Settings::load();
    logging::init(settings.log_level.as_deref());
    if let Some(e) = problem {
        tracing::warn!(error = %e, "Ignoring unreadable settings, using defaults");
    }

    iced::application("Photo Converter", PhotoConverter::update, PhotoConverter::view)
        .theme(PhotoConverter::theme)
        .window_size(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .resizable(false)
        .centered()
        .run_with(move || PhotoConverter::new(settings))
}
