//! Device capability contract: screen, input and accessibility operations.
//!
//! Every operation requires the bridge to be initialized and answers with a
//! record that echoes the request. Payload fields (pixels, UI trees, element
//! lists) stay empty until a real device backend exists.

use std::{fmt, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    lifecycle::{InitState, UninitializedError},
    status::BridgeStatus,
};

pub const DEFAULT_GESTURE_DURATION: Duration = Duration::from_millis(100);
pub const SWIPE_DURATION: Duration = Duration::from_millis(200);
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_millis(1000);

/// Screen coordinate in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    #[default]
    Tap,
    Down,
    Up,
    Move,
    PressAndHold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    #[default]
    Press,
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Swipe,
}

/// Options for a screen capture request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Display to capture; the default display when absent.
    pub display_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenCapture {
    pub success: bool,
    pub image_data: Option<Vec<u8>>,
    pub timestamp: DateTime<Utc>,
    pub dimensions: Dimensions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub density: u32,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchResult {
    pub success: bool,
    pub action: TouchAction,
    pub coordinates: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureResult {
    pub success: bool,
    pub gesture: GestureKind,
    pub start: Point,
    pub end: Point,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEventResult {
    pub success: bool,
    pub key_code: i32,
    pub action: KeyAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    pub success: bool,
    pub text: String,
    /// Length in characters.
    pub length: usize,
}

/// A node of the on-screen accessibility tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiElement {
    pub id: String,
    pub class_name: Option<String>,
    pub resource_id: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiNode {
    pub element: UiElement,
    pub children: Vec<UiNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusResult {
    pub success: bool,
    pub element: Option<UiElement>,
    pub package_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalResult {
    pub success: bool,
    pub hierarchy: Option<UiNode>,
}

/// Properties an element must carry to match. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCriteria {
    pub text: Option<String>,
    pub resource_id: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindResult {
    pub success: bool,
    pub elements: Vec<UiElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub element_id: String,
    pub action: String,
}

/// Capability permissions the bridge depends on. All start out denied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    pub accessibility: bool,
    pub overlay: bool,
    pub usage_stats: bool,
    pub input_method: bool,
}

/// System interface groups exposed by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    Display,
    Input,
    Accessibility,
}

impl InterfaceKind {
    pub const ALL: [InterfaceKind; 3] = [
        InterfaceKind::Display,
        InterfaceKind::Input,
        InterfaceKind::Accessibility,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InterfaceKind::Display => "display",
            InterfaceKind::Input => "input",
            InterfaceKind::Accessibility => "accessibility",
        }
    }

    /// Operations published under this interface, in registration order.
    pub fn operations(self) -> &'static [BridgeOperation] {
        use BridgeOperation::*;
        match self {
            InterfaceKind::Display => {
                &[CaptureScreen, GetScreenInfo, SimulateTouch, SimulateGesture]
            }
            InterfaceKind::Input => &[SendKeyEvent, SendText, Swipe, Tap, PressAndHold],
            InterfaceKind::Accessibility => {
                &[GetCurrentFocus, TraverseUi, FindElement, PerformAction]
            }
        }
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every operation a [`DeviceBridge`] offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeOperation {
    CaptureScreen,
    GetScreenInfo,
    SimulateTouch,
    SimulateGesture,
    SendKeyEvent,
    SendText,
    Swipe,
    Tap,
    PressAndHold,
    GetCurrentFocus,
    TraverseUi,
    FindElement,
    PerformAction,
}

impl BridgeOperation {
    pub fn name(self) -> &'static str {
        match self {
            BridgeOperation::CaptureScreen => "captureScreen",
            BridgeOperation::GetScreenInfo => "getScreenInfo",
            BridgeOperation::SimulateTouch => "simulateTouch",
            BridgeOperation::SimulateGesture => "simulateGesture",
            BridgeOperation::SendKeyEvent => "sendKeyEvent",
            BridgeOperation::SendText => "sendText",
            BridgeOperation::Swipe => "swipe",
            BridgeOperation::Tap => "tap",
            BridgeOperation::PressAndHold => "pressAndHold",
            BridgeOperation::GetCurrentFocus => "getCurrentFocus",
            BridgeOperation::TraverseUi => "traverseUI",
            BridgeOperation::FindElement => "findElement",
            BridgeOperation::PerformAction => "performAction",
        }
    }
}

impl fmt::Display for BridgeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contract for anything that can drive a device (real backend, stub, test fake).
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// Short name used for logging.
    fn name(&self) -> &'static str;

    /// Check permissions and register interfaces. Calling it again once
    /// initialized is a no-op.
    async fn initialize(&self) -> Result<()>;

    fn state(&self) -> InitState;

    /// Fresh status snapshot.
    fn status(&self) -> BridgeStatus;

    async fn capture_screen(
        &self,
        options: CaptureOptions,
    ) -> Result<ScreenCapture, UninitializedError>;

    fn screen_info(&self) -> Result<ScreenInfo, UninitializedError>;

    async fn simulate_touch(
        &self,
        at: Point,
        action: TouchAction,
    ) -> Result<TouchResult, UninitializedError>;

    async fn simulate_gesture(
        &self,
        start: Point,
        end: Point,
        duration: Duration,
    ) -> Result<GestureResult, UninitializedError>;

    async fn send_key_event(
        &self,
        key_code: i32,
        action: KeyAction,
    ) -> Result<KeyEventResult, UninitializedError>;

    async fn send_text(&self, text: &str) -> Result<TextResult, UninitializedError>;

    /// Swipe between two points. `steps` is accepted for interface parity
    /// and has no effect on the recorded gesture.
    async fn swipe(
        &self,
        start: Point,
        end: Point,
        _steps: u32,
    ) -> Result<GestureResult, UninitializedError> {
        self.simulate_gesture(start, end, SWIPE_DURATION).await
    }

    async fn tap(&self, at: Point) -> Result<TouchResult, UninitializedError> {
        self.simulate_touch(at, TouchAction::Tap).await
    }

    async fn press_and_hold(
        &self,
        at: Point,
        duration: Duration,
    ) -> Result<TouchResult, UninitializedError>;

    async fn get_current_focus(&self) -> Result<FocusResult, UninitializedError>;

    async fn traverse_ui(&self) -> Result<TraversalResult, UninitializedError>;

    async fn find_element(
        &self,
        criteria: &ElementCriteria,
    ) -> Result<FindResult, UninitializedError>;

    async fn perform_action(
        &self,
        element_id: &str,
        action: &str,
    ) -> Result<ActionResult, UninitializedError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_belongs_to_exactly_one_interface() {
        let mut seen = Vec::new();
        for kind in InterfaceKind::ALL {
            seen.extend_from_slice(kind.operations());
        }
        assert_eq!(seen.len(), 13);
        for op in &seen {
            assert_eq!(seen.iter().filter(|o| *o == op).count(), 1, "{op} duplicated");
        }
    }

    #[test]
    fn touch_result_omits_missing_duration() {
        let result = TouchResult {
            success: true,
            action: TouchAction::Tap,
            coordinates: Point::new(3, 4),
            duration_ms: None,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"success": true, "action": "tap", "coordinates": {"x": 3, "y": 4}})
        );
    }
}
