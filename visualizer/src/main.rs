use iced::{
    mouse,
    widget::{
        canvas::{self, Action, Canvas, Event, Frame, Geometry, Path, Stroke},
        column, row, text, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Task, Theme, Vector,
};
use log::info;
use quakecore::{
    feed::{FeatureCollection, FeedLoader},
    legend::Legend,
    marker::{CircleMarker, Color as QuakeColor},
    surface::{
        projection::{project, MAX_LATITUDE},
        MapSurface, TileLayer, Viewport,
    },
    FeedResult, LatLng, MapSession,
};

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Earthquakes, past week".into()
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

struct Visualizer {
    session: MapSession<CanvasSurface>,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    FeedLoaded(FeedResult<FeatureCollection>),
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        let loader = FeedLoader::new();
        (
            Visualizer {
                session: MapSession::new(CanvasSurface::default()),
                status: format!("Loading {}...", loader.endpoint()),
            },
            Task::perform(async move { loader.load().await }, Message::FeedLoaded),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::FeedLoaded(Ok(collection)) => {
                info!("feed delivered {} features", collection.len());
                state.status = match state.session.render_collection(&collection) {
                    Ok(summary) if summary.skipped > 0 => format!(
                        "{} earthquakes ({} records without magnitude or position)",
                        summary.markers, summary.skipped
                    ),
                    Ok(summary) => format!("{} earthquakes", summary.markers),
                    Err(err) => format!("Render error: {err}"),
                };
                Task::none()
            }
            Message::FeedLoaded(Err(err)) => {
                state.session.record_failure(&err);
                state.status = format!("Feed error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let header = row![
            text("Earthquakes, past week").size(22),
            text(&state.status).size(14),
        ]
        .spacing(16)
        .align_y(Alignment::Center)
        .padding(10);

        let map = Canvas::new(WorldMap {
            surface: state.session.surface(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        Container::new(column![header, map])
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Map surface backed by an iced canvas. Holds draw calls until the next frame.
#[derive(Debug, Clone, Default)]
struct CanvasSurface {
    viewport: Viewport,
    tile_layer: Option<TileLayer>,
    markers: Vec<CircleMarker>,
    legend: Option<Legend>,
}

impl MapSurface for CanvasSurface {
    fn set_view(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.tile_layer = Some(layer.clone());
    }

    fn add_marker(&mut self, marker: &CircleMarker) {
        self.markers.push(marker.clone());
    }

    fn add_legend(&mut self, legend: &Legend) {
        self.legend = Some(legend.clone());
    }
}

impl CanvasSurface {
    /// Screen position of `position` with the viewport center in the middle of `bounds`.
    fn to_screen(&self, bounds: Rectangle, position: LatLng) -> Point {
        let (cx, cy) = project(self.viewport.center, self.viewport.zoom);
        let (x, y) = project(position, self.viewport.zoom);
        Point::new(
            (x - cx) as f32 + bounds.width / 2.0,
            (y - cy) as f32 + bounds.height / 2.0,
        )
    }

    /// Topmost marker under `point`; later markers are drawn above earlier ones.
    fn marker_at(&self, bounds: Rectangle, point: Point) -> Option<usize> {
        self.markers.iter().enumerate().rev().find_map(|(idx, marker)| {
            let center = self.to_screen(bounds, marker.position);
            let reach = (marker.style.radius as f32).max(3.0);
            (center.distance(point) <= reach).then_some(idx)
        })
    }
}

fn to_iced(color: QuakeColor, alpha: f64) -> Color {
    let [r, g, b] = color.to_unit_rgb();
    Color::from_rgba(r, g, b, alpha as f32)
}

fn label(content: impl Into<String>, position: Point, size: f32, color: Color) -> canvas::Text {
    canvas::Text {
        content: content.into(),
        position,
        color,
        size: size.into(),
        ..canvas::Text::default()
    }
}

#[derive(Default)]
struct PopupState {
    open: Option<usize>,
}

struct WorldMap<'a> {
    surface: &'a CanvasSurface,
}

impl WorldMap<'_> {
    fn draw_base_layer(&self, frame: &mut Frame, bounds: Rectangle) {
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgb(0.05, 0.07, 0.1));

        let Some(layer) = &self.surface.tile_layer else {
            return;
        };

        let north_west = self.surface.to_screen(bounds, LatLng::new(MAX_LATITUDE, -180.0));
        let south_east = self.surface.to_screen(bounds, LatLng::new(-MAX_LATITUDE, 180.0));
        frame.fill_rectangle(
            north_west,
            Size::new(south_east.x - north_west.x, south_east.y - north_west.y),
            Color::from_rgb(0.11, 0.16, 0.22),
        );

        let graticule = Path::new(|builder| {
            for lng in (-180..=180).step_by(30) {
                let lng = f64::from(lng);
                builder.move_to(self.surface.to_screen(bounds, LatLng::new(MAX_LATITUDE, lng)));
                builder.line_to(self.surface.to_screen(bounds, LatLng::new(-MAX_LATITUDE, lng)));
            }
            for lat in (-60..=60).step_by(30) {
                let lat = f64::from(lat);
                builder.move_to(self.surface.to_screen(bounds, LatLng::new(lat, -180.0)));
                builder.line_to(self.surface.to_screen(bounds, LatLng::new(lat, 180.0)));
            }
        });
        frame.stroke(
            &graticule,
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb(0.22, 0.28, 0.36)),
        );

        frame.fill_text(label(
            layer.attribution.clone(),
            Point::new(bounds.width - 180.0, bounds.height - 16.0),
            11.0,
            Color::from_rgb(0.7, 0.7, 0.75),
        ));
    }

    fn draw_markers(&self, frame: &mut Frame, bounds: Rectangle) {
        for marker in &self.surface.markers {
            let radius = marker.style.radius as f32;
            if radius <= 0.0 {
                continue;
            }
            let center = self.surface.to_screen(bounds, marker.position);
            let circle = Path::circle(center, radius);
            frame.fill(&circle, to_iced(marker.style.fill_color, marker.style.fill_opacity));
            frame.stroke(
                &circle,
                Stroke::default()
                    .with_width(marker.style.weight as f32)
                    .with_color(to_iced(marker.style.stroke_color, marker.style.opacity)),
            );
        }
    }

    fn draw_legend(&self, frame: &mut Frame, bounds: Rectangle) {
        let Some(legend) = &self.surface.legend else {
            return;
        };
        let row_height = 22.0;
        let size = Size::new(110.0, 12.0 + row_height * legend.rows.len() as f32);
        let origin = Point::new(
            bounds.width - size.width - 12.0,
            bounds.height - size.height - 30.0,
        );
        frame.fill_rectangle(origin, size, Color::from_rgba(1.0, 1.0, 1.0, 0.9));

        for (idx, row) in legend.rows.iter().enumerate() {
            let top = origin.y + 6.0 + row_height * idx as f32;
            frame.fill_rectangle(
                Point::new(origin.x + 8.0, top + 2.0),
                Size::new(18.0, 18.0),
                to_iced(row.color, 0.8),
            );
            frame.fill_text(label(
                row.label.clone(),
                Point::new(origin.x + 34.0, top + 3.0),
                14.0,
                Color::from_rgb(0.33, 0.33, 0.33),
            ));
        }
    }

    fn draw_popup(&self, frame: &mut Frame, bounds: Rectangle, index: usize) {
        let Some(marker) = self.surface.markers.get(index) else {
            return;
        };
        let anchor = self.surface.to_screen(bounds, marker.position);
        let size = Size::new(150.0, 44.0);
        let lift = (marker.style.radius as f32).max(0.0) + 8.0;
        let origin = Point::new(anchor.x - size.width / 2.0, anchor.y - lift - size.height);
        frame.fill_rectangle(origin, size, Color::WHITE);

        for (idx, line) in marker.popup.lines().into_iter().enumerate() {
            frame.fill_text(label(
                line,
                origin + Vector::new(8.0, 6.0 + 18.0 * idx as f32),
                13.0,
                Color::BLACK,
            ));
        }
    }
}

impl canvas::Program<Message> for WorldMap<'_> {
    type State = PopupState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let point = cursor.position_in(bounds)?;
                state.open = self.surface.marker_at(bounds, point);
                Some(Action::request_redraw())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        self.draw_base_layer(&mut frame, bounds);
        self.draw_markers(&mut frame, bounds);
        self.draw_legend(&mut frame, bounds);
        if let Some(index) = state.open {
            self.draw_popup(&mut frame, bounds, index);
        }
        vec![frame.into_geometry()]
    }
}
