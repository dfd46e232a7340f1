//! Observer interface the bridge reports to.

/// Notifications from the editor to its host.
///
/// Every method defaults to a no-op; implement only what you need.
pub trait EditorDelegate {
    /// The scaled content height changed.
    fn height_changed(&mut self, _height: f64) {}

    /// Content was re-fetched after an input or custom action.
    ///
    /// Fires on every fetch, even if `html` is unchanged.
    fn content_changed(&mut self, _html: &str) {}

    fn focus_gained(&mut self) {}

    fn focus_lost(&mut self) {}

    /// The engine finished loading and buffered settings were applied.
    fn ready(&mut self) {}

    /// The engine reported a custom `action/<name>` event.
    fn custom_action(&mut self, _name: &str) {}

    /// Whether a user-activated link to `url` should be followed.
    fn should_follow_link(&mut self, _url: &str) -> bool {
        true
    }
}
