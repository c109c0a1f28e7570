use uuid::Uuid;

use crate::models::{
    AthleteZoneProfile, HrZoneConfig, HrZoneSystem, PowerZoneConfig, PowerZoneSystem,
    ZoneProfileUpdate, ZonesData,
};
use crate::session::ZoneChanges;

/// Editable fields of the settings view, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ftp,
    MaxHr,
    RestingHr,
    PowerSystem,
    HrSystem,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Ftp,
        Field::MaxHr,
        Field::RestingHr,
        Field::PowerSystem,
        Field::HrSystem,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Ftp => "FTP (W)",
            Field::MaxHr => "Max HR (bpm)",
            Field::RestingHr => "Resting HR (bpm)",
            Field::PowerSystem => "Power system",
            Field::HrSystem => "HR system",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Field::Ftp | Field::MaxHr | Field::RestingHr)
    }
}

/// Actions the event loop must perform on the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    None,
    Save,
    Reload,
}

/// State for the interactive zone settings view.
///
/// Holds text buffers for the threshold fields and the currently chosen
/// systems; the preview snapshot is recomputed locally on every edit and
/// nothing touches the network until the user asks to save.
pub struct SettingsApp {
    pub athlete_id: Uuid,
    pub should_quit: bool,
    pub show_help: bool,
    pub selected: usize,
    pub editing: bool,
    pub ftp_input: String,
    pub max_hr_input: String,
    pub resting_hr_input: String,
    pub power_system: PowerZoneSystem,
    pub hr_system: HrZoneSystem,
    /// Custom boundaries carried over from the loaded configs
    power_boundaries: Option<Vec<f64>>,
    hr_boundaries: Option<Vec<f64>>,
    pub preview: ZonesData,
    pub dirty: bool,
    pub status: String,
    pub pending: PendingAction,
}

impl SettingsApp {
    /// Build the view state from a loaded snapshot
    pub fn from_data(data: &ZonesData) -> Self {
        let number = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();

        Self {
            athlete_id: data.athlete_id,
            should_quit: false,
            show_help: false,
            selected: 0,
            editing: false,
            ftp_input: number(data.profile.ftp),
            max_hr_input: number(data.profile.max_hr),
            resting_hr_input: number(data.profile.resting_hr),
            power_system: data.power.system,
            hr_system: data.heart_rate.system,
            power_boundaries: data.power.boundaries.clone(),
            hr_boundaries: data.heart_rate.boundaries.clone(),
            preview: data.clone(),
            dirty: false,
            status: String::from("Tab: next field  Enter: edit  s: save  ?: help  q: quit"),
            pending: PendingAction::None,
        }
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL[self.selected]
    }

    /// Reset buffers to a freshly fetched snapshot
    pub fn reload(&mut self, data: &ZonesData) {
        *self = Self::from_data(data);
        self.status = String::from("Reloaded from server");
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: crossterm::event::KeyCode) {
        use crossterm::event::KeyCode;

        // Help overlay takes precedence
        if self.show_help {
            match key {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                _ => {}
            }
            return;
        }

        if self.editing {
            self.handle_edit_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }

            KeyCode::Char('?') => {
                self.show_help = true;
            }

            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.pending = PendingAction::Save;
            }

            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.pending = PendingAction::Reload;
            }

            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % Field::ALL.len();
            }

            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + Field::ALL.len() - 1) % Field::ALL.len();
            }

            KeyCode::Enter => {
                if self.selected_field().is_numeric() {
                    self.editing = true;
                    self.status = String::from("Editing; Enter or Esc to finish");
                } else {
                    self.cycle_system(true);
                }
            }

            KeyCode::Left | KeyCode::Char('h') => {
                if !self.selected_field().is_numeric() {
                    self.cycle_system(false);
                }
            }

            KeyCode::Right | KeyCode::Char('l') => {
                if !self.selected_field().is_numeric() {
                    self.cycle_system(true);
                }
            }

            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: crossterm::event::KeyCode) {
        use crossterm::event::KeyCode;

        match key {
            KeyCode::Enter | KeyCode::Esc => {
                self.editing = false;
                self.recompute_preview();
            }
            KeyCode::Backspace => {
                let _ = self.active_buffer().pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let buffer = self.active_buffer();
                if buffer.len() < 3 {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn active_buffer(&mut self) -> &mut String {
        match self.selected_field() {
            Field::Ftp => &mut self.ftp_input,
            Field::MaxHr => &mut self.max_hr_input,
            Field::RestingHr => &mut self.resting_hr_input,
            // System fields never enter edit mode
            Field::PowerSystem | Field::HrSystem => &mut self.ftp_input,
        }
    }

    fn cycle_system(&mut self, forward: bool) {
        match self.selected_field() {
            Field::PowerSystem => {
                const ORDER: [PowerZoneSystem; 3] = [
                    PowerZoneSystem::Coggan,
                    PowerZoneSystem::Polarized,
                    PowerZoneSystem::Custom,
                ];
                self.power_system = cycle(&ORDER, self.power_system, forward);
            }
            Field::HrSystem => {
                const ORDER: [HrZoneSystem; 3] = [
                    HrZoneSystem::Standard,
                    HrZoneSystem::Karvonen,
                    HrZoneSystem::Custom,
                ];
                self.hr_system = cycle(&ORDER, self.hr_system, forward);
            }
            _ => return,
        }
        self.recompute_preview();
    }

    /// Recompute the preview tables from the current buffers, locally
    pub fn recompute_preview(&mut self) {
        let profile = AthleteZoneProfile {
            ftp: parse_threshold(&self.ftp_input),
            max_hr: parse_threshold(&self.max_hr_input),
            resting_hr: parse_threshold(&self.resting_hr_input),
        };

        self.preview = ZonesData::derive(
            self.athlete_id,
            profile,
            self.power_config(),
            self.hr_config(),
        );
        self.dirty = true;
        self.status = String::from("Preview updated; press s to save");
    }

    fn power_config(&self) -> PowerZoneConfig {
        PowerZoneConfig {
            system: self.power_system,
            boundaries: if self.power_system == PowerZoneSystem::Custom {
                self.power_boundaries.clone()
            } else {
                None
            },
        }
    }

    fn hr_config(&self) -> HrZoneConfig {
        HrZoneConfig {
            system: self.hr_system,
            boundaries: if self.hr_system == HrZoneSystem::Custom {
                self.hr_boundaries.clone()
            } else {
                None
            },
        }
    }

    /// Collect the pending edits for the save sequence
    pub fn changes(&self) -> ZoneChanges {
        ZoneChanges {
            profile: Some(ZoneProfileUpdate {
                ftp: parse_threshold(&self.ftp_input),
                max_hr: parse_threshold(&self.max_hr_input),
                resting_hr: parse_threshold(&self.resting_hr_input),
            }),
            power: Some(self.power_config()),
            heart_rate: Some(self.hr_config()),
        }
    }
}

fn parse_threshold(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

fn cycle<T: Copy + PartialEq>(order: &[T], current: T, forward: bool) -> T {
    let pos = order.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % order.len()
    } else {
        (pos + order.len() - 1) % order.len()
    };
    order[next]
}
