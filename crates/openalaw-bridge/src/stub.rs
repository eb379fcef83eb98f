use std::{sync::OnceLock, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use openalaw_core::{
    bridge::{
        ActionResult, CaptureOptions, DeviceBridge, Dimensions, ElementCriteria, FindResult,
        FocusResult, GestureKind, GestureResult, KeyAction, KeyEventResult, Orientation,
        PermissionSet, Point, ScreenCapture, ScreenInfo, TextResult, TouchAction, TouchResult,
        TraversalResult,
    },
    config::{ARCHITECTURE, PLATFORM},
    lifecycle::{Component, InitState, Lifecycle, UninitializedError},
    status::BridgeStatus,
};
use tracing::{debug, info, instrument};

use crate::{permissions::check_permissions, registry::InterfaceRegistry};

/// State produced by `initialize`.
#[derive(Debug)]
struct Setup {
    permissions: PermissionSet,
    registry: InterfaceRegistry,
}

/// Deterministic device bridge: checks the lifecycle precondition, logs the
/// request and echoes it back with empty payloads.
#[derive(Debug)]
pub struct StubBridge {
    lifecycle: Lifecycle,
    setup: OnceLock<Setup>,
}

impl StubBridge {
    pub fn new() -> Self {
        debug!("device bridge created for {ARCHITECTURE}");
        Self {
            lifecycle: Lifecycle::new(Component::Bridge),
            setup: OnceLock::new(),
        }
    }

    fn ready(&self) -> Result<(), UninitializedError> {
        self.lifecycle.ensure_initialized()
    }
}

impl Default for StubBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl DeviceBridge for StubBridge {
    fn name(&self) -> &'static str {
        "stub"
    }

    #[instrument(skip_all, fields(bridge = "stub"))]
    async fn initialize(&self) -> Result<()> {
        if self.lifecycle.is_initialized() {
            debug!("device bridge already initialized");
            return Ok(());
        }
        self.lifecycle.begin();
        // Concurrent callers block here until the first one has built the setup.
        self.setup.get_or_init(|| {
            info!("initializing device bridge");
            Setup {
                permissions: check_permissions(),
                registry: InterfaceRegistry::standard(),
            }
        });
        self.lifecycle.complete();
        info!("device bridge initialized");
        Ok(())
    }

    fn state(&self) -> InitState {
        self.lifecycle.state()
    }

    fn status(&self) -> BridgeStatus {
        let (permissions, interfaces) = match self.setup.get() {
            Some(setup) => (setup.permissions, setup.registry.kinds()),
            None => (PermissionSet::default(), Vec::new()),
        };
        BridgeStatus {
            initialized: self.lifecycle.is_initialized(),
            permissions,
            interfaces,
            architecture: ARCHITECTURE.to_string(),
            platform: PLATFORM.to_string(),
            timestamp: Utc::now(),
        }
    }

    async fn capture_screen(
        &self,
        options: CaptureOptions,
    ) -> Result<ScreenCapture, UninitializedError> {
        self.ready()?;
        info!(?options, "capturing screen");
        Ok(ScreenCapture {
            success: true,
            image_data: None,
            timestamp: Utc::now(),
            dimensions: Dimensions::default(),
        })
    }

    fn screen_info(&self) -> Result<ScreenInfo, UninitializedError> {
        self.ready()?;
        debug!("getting screen info");
        Ok(ScreenInfo {
            width: 0,
            height: 0,
            density: 0,
            orientation: Orientation::Portrait,
        })
    }

    async fn simulate_touch(
        &self,
        at: Point,
        action: TouchAction,
    ) -> Result<TouchResult, UninitializedError> {
        self.ready()?;
        info!("simulating touch: {action:?} at {at}");
        Ok(TouchResult {
            success: true,
            action,
            coordinates: at,
            duration_ms: None,
        })
    }

    async fn simulate_gesture(
        &self,
        start: Point,
        end: Point,
        duration: Duration,
    ) -> Result<GestureResult, UninitializedError> {
        self.ready()?;
        let duration_ms = millis(duration);
        info!("simulating gesture from {start} to {end} over {duration_ms}ms");
        Ok(GestureResult {
            success: true,
            gesture: GestureKind::Swipe,
            start,
            end,
            duration_ms,
        })
    }

    async fn send_key_event(
        &self,
        key_code: i32,
        action: KeyAction,
    ) -> Result<KeyEventResult, UninitializedError> {
        self.ready()?;
        info!("sending key event: {key_code}, action: {action:?}");
        Ok(KeyEventResult {
            success: true,
            key_code,
            action,
        })
    }

    async fn send_text(&self, text: &str) -> Result<TextResult, UninitializedError> {
        self.ready()?;
        info!("sending text: {text}");
        Ok(TextResult {
            success: true,
            text: text.to_string(),
            length: text.chars().count(),
        })
    }

    async fn press_and_hold(
        &self,
        at: Point,
        duration: Duration,
    ) -> Result<TouchResult, UninitializedError> {
        self.ready()?;
        let duration_ms = millis(duration);
        info!("pressing and holding at {at} for {duration_ms}ms");
        Ok(TouchResult {
            success: true,
            action: TouchAction::PressAndHold,
            coordinates: at,
            duration_ms: Some(duration_ms),
        })
    }

    async fn get_current_focus(&self) -> Result<FocusResult, UninitializedError> {
        self.ready()?;
        debug!("getting current focus");
        Ok(FocusResult {
            success: true,
            element: None,
            package_name: None,
        })
    }

    async fn traverse_ui(&self) -> Result<TraversalResult, UninitializedError> {
        self.ready()?;
        debug!("traversing UI hierarchy");
        Ok(TraversalResult {
            success: true,
            hierarchy: None,
        })
    }

    async fn find_element(
        &self,
        criteria: &ElementCriteria,
    ) -> Result<FindResult, UninitializedError> {
        self.ready()?;
        info!(?criteria, "finding element");
        Ok(FindResult {
            success: true,
            elements: Vec::new(),
        })
    }

    async fn perform_action(
        &self,
        element_id: &str,
        action: &str,
    ) -> Result<ActionResult, UninitializedError> {
        self.ready()?;
        info!("performing action '{action}' on element {element_id}");
        Ok(ActionResult {
            success: true,
            element_id: element_id.to_string(),
            action: action.to_string(),
        })
    }
}
