use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, mouse_area, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task, Theme,
};
use scopecore::prelude::FrameSnapshot;
use scopecore::projection::Viewport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SCOPE_WIDTH: f32 = 540.0;
const SCOPE_HEIGHT: f32 = 960.0;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Wi-Fi Radar Scope".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_millis(100)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Visualizer {
    form: ScenarioForm,
    snapshot: FrameSnapshot,
    cursor: Point,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    FrameFetched(Result<FrameSnapshot, String>),
    CursorMoved(Point),
    ScopePressed,
    TapAcked(Result<Option<String>, String>),
    ConfigFieldChanged(ConfigField, String),
    SubmitConfig,
    ConfigSubmitted(Result<String, String>),
}

#[derive(Debug, Clone, Copy)]
enum ConfigField {
    Networks,
    Seed,
    Noise,
    HeadingRate,
    Scenario,
    Description,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                form: ScenarioForm::default(),
                snapshot: FrameSnapshot::default(),
                cursor: Point::ORIGIN,
                status: "Waiting for frames...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_frame(), Message::FrameFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_frame(), Message::FrameFetched),
            Message::FrameFetched(Ok(snapshot)) => {
                for ping in &snapshot.pings {
                    state.push_history(format!("PING {ping}"));
                }
                state.status = format!(
                    "Beam {:.0}\u{00b0} | heading {:.0}\u{00b0} {} | {} targets",
                    snapshot.beam_deg,
                    snapshot.heading_deg,
                    snapshot.compass_point,
                    snapshot.target_count
                );
                state.snapshot = snapshot;
                Task::none()
            }
            Message::FrameFetched(Err(err)) => {
                state.status = format!("Frame error: {err}");
                Task::none()
            }
            Message::CursorMoved(position) => {
                state.cursor = position;
                Task::none()
            }
            Message::ScopePressed => {
                let scale = scope_scale(&state.snapshot);
                let x = state.cursor.x / scale;
                let y = state.cursor.y / scale;
                Task::perform(post_tap(x, y), Message::TapAcked)
            }
            Message::TapAcked(Ok(selected)) => {
                match selected {
                    Some(id) => state.push_history(format!("Selected {id}")),
                    None => state.push_history("Selection cleared".into()),
                }
                Task::none()
            }
            Message::TapAcked(Err(err)) => {
                state.status = format!("Tap error: {err}");
                Task::none()
            }
            Message::ConfigFieldChanged(field, value) => {
                state.form.update_field(field, value);
                Task::none()
            }
            Message::SubmitConfig => {
                let payload = state.form.to_payload();
                Task::perform(post_config(payload), Message::ConfigSubmitted)
            }
            Message::ConfigSubmitted(Ok(message)) => {
                state.status = message;
                state.push_history("Scenario submitted".into());
                Task::none()
            }
            Message::ConfigSubmitted(Err(err)) => {
                state.status = format!("Config error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let config_column = column![
            text("Scenario").size(26),
            text_input("Networks", &state.form.networks)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Networks, value))
                .padding(6),
            text_input("Seed", &state.form.seed)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Seed, value))
                .padding(6),
            text_input("Signal jitter (dB)", &state.form.noise)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Noise, value))
                .padding(6),
            text_input("Heading rate (deg/s)", &state.form.heading_rate)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::HeadingRate, value))
                .padding(6),
            text_input("Scenario name", &state.form.scenario)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Scenario, value))
                .padding(6),
            text_input("Description", &state.form.description)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Description, value))
                .padding(6),
            button("POST scenario")
                .on_press(Message::SubmitConfig)
                .padding(10),
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Networks: synthetic access points placed in the scene.").size(12),
                text("Seed: deterministic PRNG seeding so scenes replay consistently.").size(12),
                text("Signal jitter: per-scan signal drift, simulating fading.").size(12),
                text("Heading rate: how fast the simulated device rotates.").size(12),
                text("Scenario name: tag included in the bridge log.").size(12),
                text("Description: free-text note echoed by the ingest reply.").size(12),
            ]
            .spacing(4)
            .padding(6),
            text("Tap a blip to open its detail panel; the X closes it.").size(12),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(320.0));

        let scope_canvas = Canvas::new(Scope {
            snapshot: state.snapshot.clone(),
        })
        .width(Length::Fixed(SCOPE_WIDTH))
        .height(Length::Fixed(SCOPE_HEIGHT));
        let scope = mouse_area(scope_canvas)
            .on_move(Message::CursorMoved)
            .on_press(Message::ScopePressed);

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let scope_column = column![
            text("Scope").size(26),
            scope,
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(120.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![config_column, scope_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

/// Uniform canvas scale for the viewport the bridge projects into.
fn scope_scale(snapshot: &FrameSnapshot) -> f32 {
    let width = snapshot.viewport_width.max(1.0);
    let height = snapshot.viewport_height.max(1.0);
    (SCOPE_WIDTH / width).min(SCOPE_HEIGHT / height)
}

async fn fetch_frame() -> Result<FrameSnapshot, String> {
    let response = reqwest::get("http://127.0.0.1:9000/frame")
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<FrameSnapshot>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_tap(x: f32, y: f32) -> Result<Option<String>, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/tap")
        .json(&TapBody { x, y })
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let ack = response.json::<TapAck>().await.map_err(|e| e.to_string())?;
    Ok(ack.selected)
}

async fn post_config(config: ScenarioConfig) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/ingest-config")
        .json(&config)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Scenario submitted".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Serialize)]
struct TapBody {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct TapAck {
    #[serde(default)]
    selected: Option<String>,
}

#[derive(Debug, Clone)]
struct ScenarioForm {
    networks: String,
    seed: String,
    noise: String,
    heading_rate: String,
    scenario: String,
    description: String,
}

impl Default for ScenarioForm {
    fn default() -> Self {
        Self {
            networks: "8".into(),
            seed: "0".into(),
            noise: "4.0".into(),
            heading_rate: "12.0".into(),
            scenario: "walkthrough".into(),
            description: "Rust visualizer scenario".into(),
        }
    }
}

impl ScenarioForm {
    fn update_field(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::Networks => self.networks = value,
            ConfigField::Seed => self.seed = value,
            ConfigField::Noise => self.noise = value,
            ConfigField::HeadingRate => self.heading_rate = value,
            ConfigField::Scenario => self.scenario = value,
            ConfigField::Description => self.description = value,
        }
    }

    fn to_payload(&self) -> ScenarioConfig {
        ScenarioConfig {
            network_count: self.networks.parse().ok(),
            seed: self.seed.parse().ok(),
            noise: self.noise.parse().ok(),
            heading_rate_deg_s: self.heading_rate.parse().ok(),
            scenario: if self.scenario.trim().is_empty() {
                None
            } else {
                Some(self.scenario.clone())
            },
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ScenarioConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    network_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    noise: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading_rate_deg_s: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Clone)]
struct Scope {
    snapshot: FrameSnapshot,
}

impl Scope {
    fn text_at(content: String, position: Point, color: Color, size: f32) -> canvas::Text {
        canvas::Text {
            content,
            position,
            color,
            size: size.into(),
            ..canvas::Text::default()
        }
    }
}

impl canvas::Program<Message> for Scope {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.01, 0.04, 0.01),
        );

        let snapshot = &self.snapshot;
        let scale = scope_scale(snapshot);
        let viewport = Viewport::new(
            snapshot.viewport_width.max(1.0),
            snapshot.viewport_height.max(1.0),
        );
        let (cx, cy) = viewport.center();
        let center = Point::new(cx * scale, cy * scale);
        let radius = viewport.radius() * scale;
        let green = Color::from_rgb(0.0, 1.0, 0.3);

        // Static rings.
        for (ring_radius, alpha) in [
            (radius + 15.0 * scale, 0.5),
            (radius + 25.0 * scale, 0.5),
            (radius * 0.66, 0.25),
            (radius * 0.33, 0.25),
        ] {
            let ring = Path::new(|builder| builder.circle(center, ring_radius));
            frame.stroke(
                &ring,
                Stroke::default().with_color(Color { a: alpha, ..green }),
            );
        }

        // Tick marks counter-rotate against the heading so true compass
        // directions stay fixed on the outer ring.
        let heading = snapshot.heading_deg;
        for tick in (0..360).step_by(5) {
            let screen_deg = (tick as f32 - heading).to_radians();
            let (start, end, alpha) = if tick % 90 == 0 {
                (radius + 15.0 * scale, radius - 20.0 * scale, 0.8)
            } else if tick % 10 == 0 {
                (radius + 15.0 * scale, radius - 10.0 * scale, 0.3)
            } else {
                (radius + 15.0 * scale, radius + 5.0 * scale, 0.3)
            };
            let line = Path::new(|builder| {
                builder.move_to(Point::new(
                    center.x + screen_deg.cos() * start,
                    center.y + screen_deg.sin() * start,
                ));
                builder.line_to(Point::new(
                    center.x + screen_deg.cos() * end,
                    center.y + screen_deg.sin() * end,
                ));
            });
            frame.stroke(
                &line,
                Stroke::default().with_color(Color { a: alpha, ..green }),
            );
        }

        // Cardinal letters ride the same rotation; north sits at the top
        // when the heading is zero.
        for (label, base_deg) in [("N", 270.0_f32), ("E", 0.0), ("S", 90.0), ("W", 180.0)] {
            let screen_deg = (base_deg - heading).to_radians();
            let label_radius = radius + 45.0 * scale;
            let position = Point::new(
                center.x + screen_deg.cos() * label_radius - 6.0,
                center.y + screen_deg.sin() * label_radius - 10.0,
            );
            frame.fill_text(Self::text_at(label.into(), position, green, 20.0));
        }

        // Targets, faded by angular distance behind the beam.
        for target in &snapshot.targets {
            if !target.visible {
                continue;
            }
            let alpha = f32::from(target.alpha) / 255.0;
            let color = if target.strong {
                Color::from_rgba(0.0, 1.0, 0.3, alpha)
            } else {
                Color::from_rgba(1.0, 0.25, 0.2, alpha)
            };
            let size = target.blip_size * scale;
            let position = Point::new(target.x * scale, target.y * scale);
            frame.fill_rectangle(
                Point::new(position.x - size, position.y - size),
                Size::new(size * 2.0, size * 2.0),
                color,
            );
            frame.fill_text(Self::text_at(
                format!("{} [{}m]", target.label, target.distance_label_m),
                Point::new(position.x + 12.0, position.y - 16.0),
                Color::from_rgba(1.0, 1.0, 1.0, alpha),
                12.0,
            ));
            frame.fill_text(Self::text_at(
                format!("SEC: {}", target.security),
                Point::new(position.x + 12.0, position.y + 2.0),
                Color::from_rgba(0.3, 0.9, 1.0, alpha),
                10.0,
            ));
        }

        // Sweep beam.
        let beam_rad = snapshot.beam_deg.to_radians();
        let beam = Path::new(|builder| {
            builder.move_to(center);
            builder.line_to(Point::new(
                center.x + beam_rad.cos() * radius,
                center.y + beam_rad.sin() * radius,
            ));
        });
        frame.stroke(
            &beam,
            Stroke::default().with_width(3.0).with_color(green),
        );

        // HUD readouts.
        frame.fill_text(Self::text_at(
            "SYSTEM: ONLINE".into(),
            Point::new(12.0, 12.0),
            Color { a: 0.7, ..green },
            12.0,
        ));
        frame.fill_text(Self::text_at(
            format!(
                "AZIMUTH: {:.0}\u{00b0} {}  TARGETS: {}",
                snapshot.heading_deg, snapshot.compass_point, snapshot.target_count
            ),
            Point::new(12.0, 30.0),
            Color { a: 0.7, ..green },
            12.0,
        ));

        // Detail panel.
        if let Some(panel) = &snapshot.panel {
            let top_left = Point::new(panel.rect.left * scale, panel.rect.top * scale);
            let size = Size::new(panel.rect.width * scale, panel.rect.height * scale);
            let body =
                Path::rounded_rectangle(top_left, size, iced::border::Radius::from(15.0 * scale));
            frame.fill(&body, Color::from_rgba(0.0, 0.0, 0.0, 0.96));
            frame.stroke(
                &body,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb(1.0, 0.2, 0.2)),
            );

            let close_center = Point::new(
                top_left.x + size.width - 35.0 * scale,
                top_left.y + 35.0 * scale,
            );
            let close = Path::new(|builder| builder.circle(close_center, 18.0 * scale));
            frame.fill(&close, Color::from_rgb(1.0, 0.2, 0.2));
            frame.fill_text(Self::text_at(
                "X".into(),
                Point::new(close_center.x - 4.0, close_center.y - 8.0),
                Color::WHITE,
                12.0,
            ));

            let rows = [
                ("TARGET", panel.ssid.clone()),
                ("BSSID", panel.bssid.clone()),
                ("SIGNAL", format!("{} dBm", panel.signal_dbm)),
                ("FREQ", format!("{} MHz", panel.frequency_mhz)),
                ("CHAN", format!("CH {}", panel.channel)),
                ("SEC", panel.security.to_string()),
                ("VENDOR", panel.vendor.clone()),
                ("WIDTH", panel.channel_width.clone()),
                ("DIST", format!("{:.1}m", panel.range_m)),
                ("WPS", if panel.wps { "Yes" } else { "No" }.to_string()),
            ];
            let text_x = top_left.x + 15.0 * scale;
            let gap = (size.height - 40.0 * scale) / rows.len() as f32;
            for (index, (label, value)) in rows.iter().enumerate() {
                let y = top_left.y + 25.0 * scale + gap * index as f32;
                let color = match *label {
                    "SIGNAL" if panel.signal_dbm > -60 => green,
                    "SIGNAL" if panel.signal_dbm > -80 => Color::from_rgb(1.0, 0.9, 0.2),
                    "SIGNAL" => Color::from_rgb(1.0, 0.25, 0.2),
                    "SEC" if panel.security == scopecore::scan::Security::Open => {
                        Color::from_rgb(1.0, 0.25, 0.2)
                    }
                    _ => Color::WHITE,
                };
                frame.fill_text(Self::text_at(
                    format!("{label}: {value}"),
                    Point::new(text_x, y),
                    color,
                    13.0,
                ));
            }
        }

        vec![frame.into_geometry()]
    }
}
