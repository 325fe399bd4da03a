//! View state: the last loaded payload plus a single notification slot.
//!
//! Only the session mutates it; renderers borrow it read-only.

use crate::{
    model::{Coordinates, WeatherPayload},
    theme::{self, Theme},
};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a location.";
pub const NOT_FOUND_MESSAGE: &str = "Location not found.";
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching weather data.";

/// Static credits shown by the "Development Team" action.
pub const CREDITS: &str = concat!("weather ", env!("CARGO_PKG_VERSION"), " by the weather-task developers");

/// One transient user-facing message.
///
/// Hidden initially. `show` replaces the message and makes it visible;
/// `dismiss` hides it and keeps the message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    message: String,
    visible: bool,
}

impl Notification {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The message, but only while visible.
    pub fn visible_message(&self) -> Option<&str> {
        self.visible.then_some(self.message.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    weather: Option<WeatherPayload>,
    notification: Notification,
}

impl ViewState {
    pub fn weather(&self) -> Option<&WeatherPayload> {
        self.weather.as_ref()
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn theme(&self) -> Option<Theme> {
        theme::classify(self.weather.as_ref())
    }

    /// Coordinates of the displayed payload.
    pub fn location(&self) -> Option<Coordinates> {
        self.weather.as_ref().map(WeatherPayload::coordinates)
    }

    /// Replaces the whole payload. The notification is left alone.
    pub fn load(&mut self, payload: WeatherPayload) {
        self.weather = Some(payload);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification.show(message);
    }

    pub fn dismiss(&mut self) {
        self.notification.dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn notification_starts_hidden() {
        let n = Notification::default();
        assert!(!n.is_visible());
        assert_eq!(n.message(), "");
        assert_eq!(n.visible_message(), None);
    }

    #[test]
    fn dismiss_keeps_message() {
        let mut n = Notification::default();
        n.show(NOT_FOUND_MESSAGE);
        n.dismiss();

        assert!(!n.is_visible());
        assert_eq!(n.message(), NOT_FOUND_MESSAGE);
        assert_eq!(n.visible_message(), None);
    }

    #[test]
    fn show_while_visible_replaces_message() {
        let mut n = Notification::default();
        n.show(EMPTY_QUERY_MESSAGE);
        n.show(FETCH_ERROR_MESSAGE);

        assert_eq!(n.visible_message(), Some(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn reshow_after_dismiss() {
        let mut n = Notification::default();
        n.show(EMPTY_QUERY_MESSAGE);
        n.dismiss();
        n.show(FETCH_ERROR_MESSAGE);

        assert_eq!(n.visible_message(), Some(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn load_does_not_clear_notification() {
        let mut view = ViewState::default();
        view.notify(FETCH_ERROR_MESSAGE);
        view.load(fixtures::payload("Rain", 3));

        assert_eq!(view.notification().visible_message(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(view.theme(), Some(Theme::Rainy));
        assert_eq!(view.location(), Some(Coordinates::new(27.7172, 85.324)));
    }

    #[test]
    fn load_replaces_previous_payload() {
        let mut view = ViewState::default();
        view.load(fixtures::payload("Rain", 3));
        view.load(fixtures::payload("Snow", 1));

        let weather = view.weather().expect("payload loaded");
        assert_eq!(weather.daily.len(), 1);
        assert_eq!(view.theme(), Some(Theme::Snowy));
    }
}
