use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::controllers::interactive::animation::{
    Completion, FrameScheduler, RotationClock, SchedulerAction, SchedulerState,
};
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::frame_error::FrameError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::frame_renderer::FrameRenderer;
use crate::controllers::interactive::ports::presenter_port::PresenterPort;
use crate::core::actions::render_fractal::RenderError;
use crate::core::animation::AnimationLimits;
use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::Resolution;

struct WorkerState {
    scheduler: FrameScheduler<RenderRequest>,
    job: Option<RenderRequest>,
    latest: Option<RenderRequest>,
    shutdown: bool,
}

struct SharedState {
    generation: AtomicU64,
    last_presented_generation: AtomicU64,
    state: Mutex<WorkerState>,
    wake: Condvar,
    renderer: Arc<dyn FrameRenderer>,
    presenter_port: Arc<dyn PresenterPort>,
}

impl SharedState {
    fn lock(&self) -> MutexGuard<'_, WorkerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Renders parameter snapshots on a dedicated worker thread, latest wins.
///
/// Submitting never waits for the pass in flight. A pass that is superseded while it runs
/// is finished and then dropped; only the newest snapshot reaches the presenter.
pub struct InteractiveController {
    shared: Arc<SharedState>,
    clock: RotationClock,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(
        renderer: Arc<dyn FrameRenderer>,
        presenter_port: Arc<dyn PresenterPort>,
    ) -> Self {
        Self::with_limits(renderer, presenter_port, AnimationLimits::default())
    }

    pub fn with_limits(
        renderer: Arc<dyn FrameRenderer>,
        presenter_port: Arc<dyn PresenterPort>,
        limits: AnimationLimits,
    ) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_presented_generation: AtomicU64::new(0),
            state: Mutex::new(WorkerState {
                scheduler: FrameScheduler::new(),
                job: None,
                latest: None,
                shutdown: false,
            }),
            wake: Condvar::new(),
            renderer,
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        Self {
            shared,
            clock: RotationClock::new(limits),
            worker: Some(worker),
        }
    }

    /// Queues `params` at `resolution` and returns its generation.
    pub fn submit(&self, params: FractalParameters, resolution: Resolution) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let request = RenderRequest {
            params,
            resolution,
            generation,
        };

        let start = {
            let mut guard = self.shared.lock();
            guard.latest = Some(request);

            match guard.scheduler.submit(request) {
                SchedulerAction::Start(request) => {
                    guard.job = Some(request);
                    true
                }
                SchedulerAction::Coalesced => false,
            }
        };

        if start {
            self.shared.wake.notify_one();
        } else {
            debug!(generation, "render in flight, request coalesced");
        }

        generation
    }

    /// Advances the rotation clock and resubmits the latest snapshot when the angle moved.
    pub fn tick(&mut self, elapsed: Duration) -> Option<u64> {
        let latest = self.shared.lock().latest?;
        let result = self.clock.advance(elapsed, &latest.params);

        if !result.angle_changed {
            return None;
        }

        Some(self.submit(result.params, latest.resolution))
    }

    #[must_use]
    pub fn latest_parameters(&self) -> Option<FractalParameters> {
        self.shared.lock().latest.map(|request| request.params)
    }

    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.shared.lock().scheduler.state()
    }

    #[must_use]
    pub fn last_presented_generation(&self) -> u64 {
        self.shared
            .last_presented_generation
            .load(Ordering::Acquire)
    }

    /// Lets the in-flight pass finish, drops anything pending and joins the worker.
    pub fn shutdown(&mut self) {
        {
            let mut guard = self.shared.lock();
            guard.shutdown = true;
            guard.scheduler.clear_pending();
        }
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("render worker panicked");
            }
        }
    }

    fn worker_loop(shared: &SharedState) {
        loop {
            let mut request = {
                let mut guard = shared.lock();
                loop {
                    if guard.shutdown {
                        return;
                    }

                    if let Some(job) = guard.job.take() {
                        break job;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            loop {
                let start = Instant::now();
                let result = shared.renderer.render(&request.params, request.resolution);
                let render_duration = start.elapsed();

                let completion = shared.lock().scheduler.complete();

                match completion {
                    Completion::Superseded { next } => {
                        debug!(
                            stale = request.generation,
                            next = next.generation,
                            "dropping superseded frame"
                        );
                        request = next;
                    }
                    Completion::Present | Completion::Ignored => {
                        Self::publish(shared, request, result, render_duration);
                        break;
                    }
                }
            }
        }
    }

    fn publish(
        shared: &SharedState,
        request: RenderRequest,
        result: Result<PixelBuffer, RenderError>,
        render_duration: Duration,
    ) {
        let generation = request.generation;

        let event = match result {
            Ok(pixel_buffer) => {
                debug!(
                    generation,
                    width = request.resolution.width(),
                    height = request.resolution.height(),
                    elapsed_ms = render_duration.as_millis() as u64,
                    "frame rendered"
                );

                RenderEvent::Frame(FrameData {
                    generation,
                    params: request.params,
                    pixel_buffer,
                    render_duration,
                })
            }
            Err(source) => {
                warn!(generation, error = %source, "frame failed");

                RenderEvent::Error(FrameError { generation, source })
            }
        };

        shared
            .last_presented_generation
            .store(generation, Ordering::Release);
        shared.presenter_port.present(event);
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::raymarch_renderer::RaymarchRenderer;
    use crate::core::data::render_settings::{RenderSettings, SettingsError};

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }
    }

    impl PresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    /// Blocks every render until a permit is released, recording what it was asked for.
    #[derive(Default)]
    struct GatedRenderer {
        started: Mutex<Vec<FractalParameters>>,
        permits: Mutex<u32>,
        opened: Condvar,
    }

    impl GatedRenderer {
        fn release(&self, count: u32) {
            *self.permits.lock().unwrap() += count;
            self.opened.notify_all();
        }

        fn started(&self) -> Vec<FractalParameters> {
            self.started.lock().unwrap().clone()
        }

        fn wait_started(&self, count: usize, timeout: Duration) -> bool {
            let start = Instant::now();
            while start.elapsed() < timeout {
                if self.started.lock().unwrap().len() >= count {
                    return true;
                }
                thread::sleep(Duration::from_millis(5));
            }
            false
        }
    }

    impl FrameRenderer for GatedRenderer {
        fn render(
            &self,
            params: &FractalParameters,
            resolution: Resolution,
        ) -> Result<PixelBuffer, RenderError> {
            self.started.lock().unwrap().push(*params);

            let mut permits = self.permits.lock().unwrap();
            while *permits == 0 {
                permits = self.opened.wait(permits).unwrap();
            }
            *permits -= 1;

            Ok(PixelBuffer::new(resolution))
        }
    }

    fn wait_for_events(sink: &MockPresenterPort, timeout: Duration) -> Vec<RenderEvent> {
        let start = Instant::now();
        loop {
            let events = sink.take_events();
            if !events.is_empty() {
                return events;
            }
            if start.elapsed() >= timeout {
                return events;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn resolution() -> Resolution {
        Resolution::new(8, 6).unwrap()
    }

    fn zoomed(zoom: f64) -> FractalParameters {
        FractalParameters::default()
            .updated(|r| r.zoom_coefficient = zoom)
            .unwrap()
    }

    fn gated_controller() -> (InteractiveController, Arc<GatedRenderer>, Arc<MockPresenterPort>) {
        let renderer = Arc::new(GatedRenderer::default());
        let presenter_port = Arc::new(MockPresenterPort::default());
        let controller = InteractiveController::new(
            Arc::clone(&renderer) as Arc<dyn FrameRenderer>,
            Arc::clone(&presenter_port) as Arc<dyn PresenterPort>,
        );

        (controller, renderer, presenter_port)
    }

    #[test]
    fn test_submit_emits_frame() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = InteractiveController::new(
            Arc::new(RaymarchRenderer::default()),
            Arc::clone(&presenter_port) as Arc<dyn PresenterPort>,
        );

        let generation = controller.submit(FractalParameters::default(), resolution());
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(5));

        assert_eq!(events.len(), 1);
        match &events[0] {
            RenderEvent::Frame(frame) => {
                assert_eq!(frame.generation, generation);
                assert_eq!(frame.pixel_buffer.resolution(), resolution());
                assert_eq!(frame.pixel_buffer.buffer().len(), 8 * 6 * 3);
            }
            RenderEvent::Error(error) => panic!("unexpected render error: {error}"),
        }
        assert_eq!(controller.last_presented_generation(), generation);

        controller.shutdown();
    }

    #[test]
    fn test_p1_then_p2_presents_only_p2() {
        let (mut controller, renderer, presenter_port) = gated_controller();
        let p1 = zoomed(1.0);
        let p2 = zoomed(2.0);

        controller.submit(p1, resolution());
        assert!(renderer.wait_started(1, Duration::from_secs(2)));
        let g2 = controller.submit(p2, resolution());
        assert_eq!(controller.scheduler_state(), SchedulerState::PendingDirty);

        renderer.release(2);
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        thread::sleep(Duration::from_millis(100));
        let late = presenter_port.take_events();

        assert_eq!(events.len(), 1);
        assert!(late.is_empty());
        match &events[0] {
            RenderEvent::Frame(frame) => {
                assert_eq!(frame.generation, g2);
                assert_eq!(frame.params, p2);
            }
            RenderEvent::Error(error) => panic!("unexpected render error: {error}"),
        }
        assert_eq!(renderer.started(), vec![p1, p2]);

        controller.shutdown();
    }

    #[test]
    fn test_intermediate_snapshots_are_never_rendered() {
        let (mut controller, renderer, presenter_port) = gated_controller();

        controller.submit(zoomed(1.0), resolution());
        assert!(renderer.wait_started(1, Duration::from_secs(2)));
        for zoom in [2.0, 3.0, 4.0] {
            controller.submit(zoomed(zoom), resolution());
        }

        renderer.release(2);
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

        assert_eq!(events.len(), 1);
        assert_eq!(renderer.started(), vec![zoomed(1.0), zoomed(4.0)]);

        controller.shutdown();
    }

    #[test]
    fn test_generations_increase() {
        let (mut controller, renderer, _presenter_port) = gated_controller();
        renderer.release(10);

        let first = controller.submit(zoomed(1.0), resolution());
        let second = controller.submit(zoomed(2.0), resolution());

        assert!(second > first);
        assert!(first > 0);

        controller.shutdown();
    }

    #[test]
    fn test_render_failure_is_reported_with_generation() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let settings = RenderSettings {
            max_steps: 0,
            ..RenderSettings::default()
        };
        let mut controller = InteractiveController::new(
            Arc::new(RaymarchRenderer::new(settings)),
            Arc::clone(&presenter_port) as Arc<dyn PresenterPort>,
        );

        let generation = controller.submit(FractalParameters::default(), resolution());
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

        assert_eq!(events.len(), 1);
        match &events[0] {
            RenderEvent::Error(error) => {
                assert_eq!(error.generation, generation);
                assert_eq!(error.source, RenderError::Settings(SettingsError::ZeroSteps));
            }
            RenderEvent::Frame(_) => panic!("expected an error event"),
        }

        controller.shutdown();
    }

    #[test]
    fn test_tick_resubmits_when_rotating() {
        let (mut controller, renderer, presenter_port) = gated_controller();
        renderer.release(10);
        let spinning = FractalParameters::default().with_rotation_speed(60.0).unwrap();

        assert_eq!(controller.tick(Duration::from_secs_f64(1.0 / 60.0)), None);

        controller.submit(spinning, resolution());
        let _ = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

        let generation = controller.tick(Duration::from_secs_f64(1.0 / 60.0));
        assert!(generation.is_some());

        let latest = controller.latest_parameters().unwrap();
        assert!((latest.rotation().angle_degrees - 1.0).abs() < 1e-9);

        controller.shutdown();
    }

    #[test]
    fn test_tick_is_quiet_when_rotation_is_off() {
        let (mut controller, renderer, _presenter_port) = gated_controller();
        renderer.release(10);

        controller.submit(FractalParameters::default(), resolution());

        assert_eq!(controller.tick(Duration::from_millis(100)), None);

        controller.shutdown();
    }

    #[test]
    fn test_shutdown_lets_in_flight_pass_finish() {
        let (mut controller, renderer, presenter_port) = gated_controller();

        controller.submit(zoomed(1.0), resolution());
        assert!(renderer.wait_started(1, Duration::from_secs(2)));
        controller.submit(zoomed(2.0), resolution());

        let releaser = {
            let renderer = Arc::clone(&renderer);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                renderer.release(1);
            })
        };

        controller.shutdown();
        releaser.join().unwrap();

        assert_eq!(renderer.started(), vec![zoomed(1.0)]);
        assert_eq!(presenter_port.take_events().len(), 1);
    }

    #[test]
    fn test_last_presented_generation_starts_at_zero() {
        let (mut controller, _renderer, _presenter_port) = gated_controller();

        assert_eq!(controller.last_presented_generation(), 0);
        assert_eq!(controller.scheduler_state(), SchedulerState::Idle);

        controller.shutdown();
    }
}
