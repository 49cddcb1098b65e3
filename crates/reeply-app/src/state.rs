// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub follow_latest: bool,
    pub show_legend: bool,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            follow_latest: false,
            show_legend: false,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    ToggleFollow,
    ToggleLegend,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    FollowChanged(bool),
    LegendChanged(bool),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::ToggleFollow => {
                self.follow_latest = !self.follow_latest;
                let label = if self.follow_latest {
                    "follow on"
                } else {
                    "follow off"
                };
                vec![
                    AppEvent::FollowChanged(self.follow_latest),
                    self.set_status(label),
                ]
            }
            AppCommand::ToggleLegend => {
                self.show_legend = !self.show_legend;
                let label = if self.show_legend {
                    "legend shown"
                } else {
                    "legend hidden"
                };
                vec![
                    AppEvent::LegendChanged(self.show_legend),
                    self.set_status(label),
                ]
            }
            AppCommand::SetStatus(message) => {
                vec![self.set_status(&message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
