//! Display surface with asynchronous composite
//!
//! The surface owns a single "currently shown" slot. [`DisplaySurface::show`]
//! registers content and returns immediately; one composite pass then runs on
//! its own thread, paints the content into the surface framebuffer, and flips
//! the content's shown flag. Callers observe the flip by polling
//! [`ContentHandle::is_shown`] or through the bounded
//! [`DisplaySurface::wait_shown`] loop.
//!
//! Per content instance the state machine is `Created -> Pending ->
//! Composited`, with the single transition fired by the first composite pass
//! and never reversed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::SurfaceConfig;
use crate::fault::Fault;
use crate::graphics::{Framebuffer, Graphics};

/// How long shown content stays up before the surface may dismiss it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Keep the content up until it is replaced
    Forever,
    /// Dismissable after the given duration
    Timed(Duration),
}

impl Default for TimeoutPolicy {
    /// Non-modal content defaults to a finite timeout; `Forever` is opt-in
    fn default() -> Self {
        Self::Timed(Duration::from_secs(2))
    }
}

/// Alert severity, selecting the chrome colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    /// Informational notice
    Info,
    /// Warning
    Warning,
    /// Error report
    Error,
    /// Alarm
    Alarm,
    /// Confirmation prompt
    Confirmation,
}

impl AlertType {
    /// Accent color for the title band, packed `0x00RRGGBB`
    fn accent(self) -> u32 {
        match self {
            Self::Info => 0x00_2060C0,
            Self::Warning => 0x00_C0A020,
            Self::Error => 0x00_C02020,
            Self::Alarm => 0x00_C06020,
            Self::Confirmation => 0x00_20A040,
        }
    }
}

/// A titled message box, the simplest displayable content.
#[derive(Debug, Clone)]
pub struct Alert {
    title: String,
    text: String,
    alert_type: AlertType,
    timeout: TimeoutPolicy,
}

impl Alert {
    /// Create an alert with the default (finite) timeout
    pub fn new(title: impl Into<String>, text: impl Into<String>, alert_type: AlertType) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            alert_type,
            timeout: TimeoutPolicy::default(),
        }
    }

    /// Override the timeout policy
    pub fn with_timeout(mut self, timeout: TimeoutPolicy) -> Self {
        self.timeout = timeout;
        self
    }

    /// Alert title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Alert body text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Paintable for Alert {
    fn paint(&mut self, g: &mut Graphics<'_>) {
        // Body background, then a title band in the severity accent.
        g.set_color(0x00_E8E8E8);
        g.fill_rect(0, 0, g.width(), g.height());
        g.set_color(self.alert_type.accent());
        g.fill_rect(0, 0, g.width(), 24);
        log::debug!("alert painted: {:?} '{}'", self.alert_type, self.title);
    }
}

/// Content that paints itself during a composite pass.
pub trait Paintable: Send {
    /// Paint one frame into the supplied graphics context
    fn paint(&mut self, g: &mut Graphics<'_>);
}

impl<F: FnMut(&mut Graphics<'_>) + Send> Paintable for F {
    fn paint(&mut self, g: &mut Graphics<'_>) {
        self(g);
    }
}

/// Visibility state shared between a content instance and its handles
struct ContentShared {
    shown: AtomicBool,
}

/// Cheap cloneable handle for polling a content instance's visibility.
///
/// Remains valid after the content itself has been handed to the surface or
/// replaced; the flag never regresses to false for a given instance.
#[derive(Clone)]
pub struct ContentHandle {
    shared: Arc<ContentShared>,
}

impl ContentHandle {
    /// Whether at least one composite pass for this content has completed
    pub fn is_shown(&self) -> bool {
        self.shared.shown.load(Ordering::Acquire)
    }

    fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

/// A displayable unit: paint payload, timeout policy, and visibility flag.
pub struct Content {
    shared: Arc<ContentShared>,
    timeout: TimeoutPolicy,
    painter: Box<dyn Paintable>,
}

impl Content {
    /// Wrap an alert as displayable content
    pub fn alert(alert: Alert) -> Self {
        let timeout = alert.timeout;
        Self {
            shared: Arc::new(ContentShared { shown: AtomicBool::new(false) }),
            timeout,
            painter: Box::new(alert),
        }
    }

    /// Wrap a canvas painter as displayable content.
    ///
    /// The painter is invoked with a [`Graphics`] context during the
    /// composite pass, canvas-style.
    pub fn canvas<P: Paintable + 'static>(painter: P) -> Self {
        Self {
            shared: Arc::new(ContentShared { shown: AtomicBool::new(false) }),
            timeout: TimeoutPolicy::Forever,
            painter: Box::new(painter),
        }
    }

    /// Handle for polling this content's visibility
    pub fn handle(&self) -> ContentHandle {
        ContentHandle { shared: Arc::clone(&self.shared) }
    }

    /// The content's timeout policy
    pub fn timeout(&self) -> TimeoutPolicy {
        self.timeout
    }
}

/// The display surface: one shown slot, asynchronous composite.
pub struct DisplaySurface {
    framebuffer: Arc<Mutex<Framebuffer>>,
    current: Option<ContentHandle>,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl DisplaySurface {
    /// Create a surface with the configured geometry and polling cadence
    pub fn new(config: &SurfaceConfig) -> Self {
        Self {
            framebuffer: Arc::new(Mutex::new(Framebuffer::new(config.width, config.height))),
            current: None,
            poll_interval: config.poll_interval(),
            wait_timeout: config.wait_timeout(),
        }
    }

    /// Register `content` as current and schedule its composite pass.
    ///
    /// Returns immediately; the pass runs on its own thread. The previously
    /// current content (if any) is replaced, and its payload is dropped once
    /// its own pass has finished with it.
    pub fn show(&mut self, content: Content) {
        let Content { shared, timeout, mut painter } = content;
        self.current = Some(ContentHandle { shared: Arc::clone(&shared) });
        log::debug!("content registered, timeout {:?}", timeout);

        let framebuffer = Arc::clone(&self.framebuffer);
        thread::spawn(move || {
            let mut guard = match framebuffer.lock() {
                Ok(guard) => guard,
                Err(e) => {
                    log::error!("framebuffer lock poisoned, skipping composite: {}", e);
                    return;
                }
            };
            let mut g = Graphics::new(&mut guard);
            painter.paint(&mut g);
            // Publish visibility only after the pass has fully materialized.
            shared.shown.store(true, Ordering::Release);
            log::debug!("composite pass complete");
        });
    }

    /// Whether the given content has been composited at least once.
    ///
    /// Safe to poll concurrently with an in-flight composite pass.
    pub fn is_shown(&self, handle: &ContentHandle) -> bool {
        handle.is_shown()
    }

    /// Handle of the currently registered content, if any
    pub fn current(&self) -> Option<&ContentHandle> {
        self.current.as_ref()
    }

    /// Poll until `handle` is shown, using the configured cadence and bound.
    ///
    /// Returns [`Fault::Timeout`] when the bound expires, and
    /// [`Fault::Interrupted`] when the awaited content is replaced before its
    /// composite pass is observed, since waiting further cannot succeed.
    pub fn wait_shown(&self, handle: &ContentHandle) -> Result<(), Fault> {
        self.wait_shown_for(handle, self.wait_timeout, self.poll_interval)
    }

    /// Poll until `handle` is shown, with explicit bound and cadence
    pub fn wait_shown_for(
        &self,
        handle: &ContentHandle,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<(), Fault> {
        let started = Instant::now();
        loop {
            if handle.is_shown() {
                return Ok(());
            }
            if !self.current.as_ref().is_some_and(|c| c.same_instance(handle)) {
                return Err(Fault::Interrupted);
            }
            if started.elapsed() >= timeout {
                return Err(Fault::Timeout { waited: started.elapsed() });
            }
            thread::sleep(poll_interval);
        }
    }

    /// Snapshot of the framebuffer contents.
    ///
    /// Blocks until no composite pass holds the buffer.
    pub fn snapshot(&self) -> Framebuffer {
        match self.framebuffer.lock() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                log::error!("framebuffer lock poisoned: {}", e);
                e.into_inner().clone()
            }
        }
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.snapshot().width()
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.snapshot().height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;

    fn test_config() -> SurfaceConfig {
        // Tight cadence so tests finish quickly
        SurfaceConfig { width: 32, height: 32, poll_interval_ms: 5, wait_timeout_ms: 2000 }
    }

    #[test]
    fn shown_content_becomes_visible_within_bound() {
        let mut surface = DisplaySurface::new(&test_config());
        let alert = Alert::new("Hello World", "Some text", AlertType::Info)
            .with_timeout(TimeoutPolicy::Forever);
        let content = Content::alert(alert);
        let handle = content.handle();

        assert!(!handle.is_shown());
        surface.show(content);
        surface.wait_shown(&handle).unwrap();
        assert!(handle.is_shown());
    }

    #[test]
    fn is_shown_is_idempotent() {
        let mut surface = DisplaySurface::new(&test_config());
        let content = Content::alert(Alert::new("t", "b", AlertType::Info));
        let handle = content.handle();
        surface.show(content);
        surface.wait_shown(&handle).unwrap();

        for _ in 0..10 {
            assert!(handle.is_shown());
            assert!(surface.is_shown(&handle));
        }
    }

    #[test]
    fn composite_paints_the_alert_chrome() {
        let mut surface = DisplaySurface::new(&test_config());
        let content = Content::alert(
            Alert::new("t", "b", AlertType::Error).with_timeout(TimeoutPolicy::Forever),
        );
        let handle = content.handle();
        surface.show(content);
        surface.wait_shown(&handle).unwrap();

        let fb = surface.snapshot();
        // Title band carries the error accent, body the neutral background.
        assert_eq!(fb.pixel(0, 0), [0xC0, 0x20, 0x20, 0xFF]);
        assert_eq!(fb.pixel(0, 31), [0xE8, 0xE8, 0xE8, 0xFF]);
    }

    #[test]
    fn canvas_painter_runs_during_composite() {
        let mut surface = DisplaySurface::new(&test_config());
        let content = Content::canvas(|g: &mut Graphics<'_>| {
            g.set_color(0x00FF_FFFF);
            g.fill_rect(0, 0, g.width(), g.height());
        });
        let handle = content.handle();
        surface.show(content);
        surface.wait_shown(&handle).unwrap();
        assert_eq!(surface.snapshot().pixel(16, 16), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn replaced_content_interrupts_waiters() {
        let mut surface = DisplaySurface::new(&test_config());
        let first = Content::alert(Alert::new("first", "", AlertType::Info));
        let first_handle = first.handle();
        let second = Content::alert(Alert::new("second", "", AlertType::Info));
        let second_handle = second.handle();

        surface.show(first);
        surface.show(second);
        surface.wait_shown(&second_handle).unwrap();

        // The first instance is no longer current; a waiter that never saw it
        // composited gets an interrupted wait rather than a hang.
        match surface.wait_shown(&first_handle) {
            Ok(()) => assert!(first_handle.is_shown()),
            Err(fault) => assert_eq!(fault.kind(), FaultKind::Interrupted),
        }
    }

    #[test]
    fn wait_on_unregistered_content_reports_interrupted() {
        let surface = DisplaySurface::new(&test_config());
        // Content never handed to the surface: nothing will composite it, and
        // it is not current, so the wait reports an interrupted wait.
        let content = Content::alert(Alert::new("orphan", "", AlertType::Info));
        let handle = content.handle();

        let fault = surface.wait_shown(&handle).unwrap_err();
        assert_eq!(fault.kind(), FaultKind::Interrupted);
    }

    #[test]
    fn slow_composite_trips_the_wait_bound() {
        let mut surface = DisplaySurface::new(&test_config());
        let content = Content::canvas(|_g: &mut Graphics<'_>| {
            thread::sleep(Duration::from_millis(500));
        });
        let handle = content.handle();
        surface.show(content);

        let fault = surface
            .wait_shown_for(&handle, Duration::from_millis(50), Duration::from_millis(5))
            .unwrap_err();
        assert_eq!(fault.kind(), FaultKind::Timeout);
    }

    #[test]
    fn show_updates_the_current_slot() {
        let mut surface = DisplaySurface::new(&test_config());
        assert!(surface.current().is_none());

        let content = Content::alert(Alert::new("t", "b", AlertType::Info));
        let handle = content.handle();
        surface.show(content);
        assert!(surface.current().is_some_and(|c| c.same_instance(&handle)));
    }

    #[test]
    fn alert_exposes_title_and_text() {
        let alert = Alert::new("Hello World", "Some text", AlertType::Info);
        assert_eq!(alert.title(), "Hello World");
        assert_eq!(alert.text(), "Some text");
    }

    #[test]
    fn timeout_policy_defaults_to_timed() {
        assert!(matches!(TimeoutPolicy::default(), TimeoutPolicy::Timed(_)));
        let alert = Alert::new("t", "b", AlertType::Info).with_timeout(TimeoutPolicy::Forever);
        assert_eq!(Content::alert(alert).timeout(), TimeoutPolicy::Forever);
    }

    #[test]
    fn poll_loop_observes_composite_from_another_thread() {
        // Cross-thread visibility of the shown flag: the poller runs on its
        // own thread while the composite pass runs on the surface's.
        let mut surface = DisplaySurface::new(&test_config());
        let content = Content::alert(Alert::new("t", "b", AlertType::Info));
        let handle = content.handle();
        surface.show(content);

        let poller = thread::spawn(move || {
            let started = Instant::now();
            while !handle.is_shown() {
                if started.elapsed() > Duration::from_secs(2) {
                    return false;
                }
                thread::sleep(Duration::from_millis(5));
            }
            true
        });
        assert!(poller.join().unwrap());
    }
}
