use anyhow::Context;
use quadview_common::{Key, ViewerConfig};
use quadview_input::InputEvent;
use quadview_kernel::{AppState, FrameLoop, ManualClock, RecordingPlatform};
use quadview_render::DebugScene;
use serde::Serialize;

/// Frames each movement key is held for, followed by as many idle frames.
const SEGMENT: u64 = 20;
const PATTERN: [Key; 4] = [Key::W, Key::A, Key::S, Key::D];

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub frames: u64,
    pub fps: f64,
    pub titles: Vec<String>,
    pub moving_frames: u64,
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub frames_presented: u64,
    pub dropped_events: u64,
    /// Eye position the scene last drew from.
    pub eye: Option<[f32; 3]>,
    #[serde(skip)]
    pub scene_summary: String,
}

fn send(state: &mut AppState<DebugScene>, code: Key, pressed: bool) -> anyhow::Result<()> {
    state
        .queue
        .push(InputEvent::Key { code, pressed })
        .with_context(|| format!("queueing {code} {}", if pressed { "press" } else { "release" }))
}

/// Run the frame loop headlessly with a synthetic clock ticking at `fps`.
///
/// Movement keys cycle W, A, S, D, each held for a segment and released for
/// the next one.
pub fn run(config: &ViewerConfig, frames: u64, fps: f64) -> anyhow::Result<SimulationReport> {
    let scene = DebugScene::new(config.window.width, config.window.height).without_call_log();
    let mut state = AppState::bootstrap(scene, config)?;
    let mut frame_loop = FrameLoop::new(config.window.title.clone(), &config.timing, 0.0);
    let mut platform = RecordingPlatform::new();
    let clock = ManualClock::new(0.0);
    let step = 1.0 / fps;

    let mut held: Option<Key> = None;
    let mut moving_frames = 0;
    let mut fps_estimate = 0.0;

    for frame in 0..frames {
        let segment = frame / SEGMENT;
        let wanted = (segment % 2 == 0).then(|| PATTERN[((segment / 2) % 4) as usize]);
        if wanted != held {
            if let Some(key) = held {
                send(&mut state, key, false)?;
            }
            if let Some(key) = wanted {
                send(&mut state, key, true)?;
            }
            held = wanted;
        }

        clock.advance(step);
        let before = state.camera.position;
        let report = frame_loop.run_frame(&mut state, &mut platform, &clock)?;
        if state.camera.position != before {
            moving_frames += 1;
        }
        if let Some(fps) = report.fps {
            fps_estimate = fps;
        }
        if !report.running {
            break;
        }
    }

    tracing::debug!(frames = frame_loop.frames(), moving_frames, "simulation finished");

    let dropped_events = state.queue.dropped();
    let camera = &state.camera;
    Ok(SimulationReport {
        frames: frame_loop.frames(),
        fps: fps_estimate,
        titles: platform.titles,
        moving_frames,
        position: camera.position.to_array(),
        yaw: camera.yaw,
        pitch: camera.pitch,
        frames_presented: state.scene.frames_presented(),
        dropped_events,
        eye: state.scene.last_eye().map(|eye| eye.to_array()),
        scene_summary: state.scene.describe(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_moves_only_while_a_key_is_held() {
        let report = run(&ViewerConfig::default(), 160, 60.0).unwrap();
        assert_eq!(report.frames, 160);
        assert_eq!(report.frames_presented, 160);
        // Segments 0, 2, 4, 6 hold a key
        assert_eq!(report.moving_frames, 80);
    }

    #[test]
    fn title_tracks_synthetic_rate() {
        let report = run(&ViewerConfig::default(), 120, 30.0).unwrap();
        assert_eq!(report.titles, vec!["quadview [FPS: 30]".to_string(); 2]);
        assert!((report.fps - 30.0).abs() < 1e-6);
    }

    #[test]
    fn full_queue_is_an_error() {
        let mut config = ViewerConfig::default();
        config.input.queue_capacity = 1;
        let mut state = AppState::bootstrap(DebugScene::new(1, 1), &config).unwrap();
        send(&mut state, Key::W, true).unwrap();
        let err = send(&mut state, Key::W, false).unwrap_err();
        assert!(err.to_string().contains("W release"));
        assert_eq!(state.queue.dropped(), 1);
    }

    #[test]
    fn report_includes_scene_summary() {
        let report = run(&ViewerConfig::default(), 5, 60.0).unwrap();
        assert!(report.scene_summary.contains("frames=5"));
        assert!(report.eye.is_some());
    }

    #[test]
    fn report_serializes() {
        let report = run(&ViewerConfig::default(), 10, 60.0).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["frames"], 10);
        assert!(json["position"].is_array());
    }
}
