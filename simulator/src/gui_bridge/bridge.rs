use crate::generator::profile::{build_scan, GeneratorConfig};
use crate::gui_bridge::model::{TapRequest, TapResponse};
use crate::workflow::runner::Runner;
use scopecore::feed::FeedPublisher;
use scopecore::scan::Observation;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// Bridge that hosts the frame endpoint and feeds renderer input back into
/// the runner. `GET /frame` is the render loop's pull: each request ticks
/// the runner exactly once and returns the fresh snapshot.
pub struct GuiBridge {
    runner: Arc<Mutex<Runner>>,
}

impl GuiBridge {
    pub fn new(
        runner: Arc<Mutex<Runner>>,
        scan_publisher: Arc<FeedPublisher<Vec<Observation>>>,
    ) -> Self {
        let runner_for_filter = runner.clone();
        let runner_filter = warp::any().map(move || runner_for_filter.clone());
        let publisher_filter = warp::any().map(move || scan_publisher.clone());

        let frame_route = warp::path("frame")
            .and(warp::get())
            .and(runner_filter.clone())
            .map(|runner: Arc<Mutex<Runner>>| {
                let snapshot = runner.lock().unwrap().tick();
                warp::reply::json(&snapshot)
            });

        let tap_route = warp::path("tap")
            .and(warp::post())
            .and(warp::body::json())
            .and(runner_filter)
            .map(|tap: TapRequest, runner: Arc<Mutex<Runner>>| {
                let selected = runner.lock().unwrap().tap(tap.x, tap.y);
                warp::reply::json(&TapResponse {
                    status: "ok".into(),
                    selected,
                })
            });

        let scan_route = warp::path("scan")
            .and(warp::post())
            .and(warp::body::json())
            .and(publisher_filter.clone())
            .map(
                |observations: Vec<Observation>,
                 publisher: Arc<FeedPublisher<Vec<Observation>>>| {
                    println!("[GUI] scan ingested: {} observations", observations.len());
                    publisher.publish(observations);
                    warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok"})),
                        StatusCode::OK,
                    )
                },
            );

        let generator_route = warp::path("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(publisher_filter)
            .map(
                |config: GeneratorConfig, publisher: Arc<FeedPublisher<Vec<Observation>>>| {
                    let scene = build_scan(&config, 0);
                    if let Some(name) = config.scenario.as_ref() {
                        println!("[GUI] Scenario {} -> {} networks", name, scene.len());
                    }
                    let reply = json!({
                        "status": "ok",
                        "targets": scene.len(),
                        "description": config.description.clone().unwrap_or_default()
                    });
                    publisher.publish(scene);
                    warp::reply::with_status(warp::reply::json(&reply), StatusCode::OK)
                },
            );

        thread::spawn(move || {
            let routes = frame_route
                .or(tap_route)
                .or(scan_route)
                .or(generator_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { runner }
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn tick_once(&self) -> scopecore::prelude::FrameSnapshot {
        self.runner.lock().unwrap().tick()
    }
}
