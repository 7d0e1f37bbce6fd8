//! Menu shell: which screen is showing and what the menu buttons do.
//!
//! Screens are a tagged variant with per-screen state. The host routes
//! ticks and key input only to the play screen.

use tessera_core::AudioChannel;

/// Background gain while unmuted.
pub const UNMUTED_GAIN_DB: f32 = -10.0;
/// Background gain while muted.
pub const MUTED_GAIN_DB: f32 = -80.0;

/// Buttons on the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuButton {
    /// Open the board.
    Play,
    /// Open the leaderboard.
    Scores,
    /// Leave the program.
    Quit,
    /// Toggle background music.
    Mute,
}

impl MenuButton {
    /// All buttons, top to bottom.
    pub const ALL: [MenuButton; 4] = [
        MenuButton::Play,
        MenuButton::Scores,
        MenuButton::Quit,
        MenuButton::Mute,
    ];
}

/// The screen currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Main menu.
    Menu {
        /// Button under the pointer, if any.
        hovered: Option<MenuButton>,
    },
    /// The board.
    Play,
    /// Leaderboard tables.
    Leaderboards,
}

/// Side effect of a shell input that the host must carry out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShellAction {
    /// The screen changed.
    Navigated,
    /// The user asked to leave.
    Quit,
    /// Change a channel's volume.
    SetVolume {
        /// Channel to adjust.
        channel: AudioChannel,
        /// New gain in decibels.
        gain_db: f32,
    },
}

/// Screen routing and mute state.
#[derive(Clone, Debug)]
pub struct Shell {
    screen: Screen,
    muted: bool,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Start on the main menu, unmuted.
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu { hovered: None },
            muted: false,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Whether the board is showing.
    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Play
    }

    /// Whether background music is muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Move the pointer highlight. Ignored off the menu.
    pub fn hover(&mut self, button: Option<MenuButton>) {
        if let Screen::Menu { hovered } = &mut self.screen {
            *hovered = button;
        }
    }

    /// Press a menu button. Returns `None` off the menu.
    pub fn click(&mut self, button: MenuButton) -> Option<ShellAction> {
        if !matches!(self.screen, Screen::Menu { .. }) {
            return None;
        }
        let action = match button {
            MenuButton::Play => {
                self.screen = Screen::Play;
                ShellAction::Navigated
            }
            MenuButton::Scores => {
                self.screen = Screen::Leaderboards;
                ShellAction::Navigated
            }
            MenuButton::Quit => ShellAction::Quit,
            MenuButton::Mute => {
                self.muted = !self.muted;
                ShellAction::SetVolume {
                    channel: AudioChannel::Background,
                    gain_db: self.background_gain_db(),
                }
            }
        };
        Some(action)
    }

    /// Return to the menu from any other screen.
    pub fn back(&mut self) -> Option<ShellAction> {
        if matches!(self.screen, Screen::Menu { .. }) {
            return None;
        }
        self.screen = Screen::Menu { hovered: None };
        Some(ShellAction::Navigated)
    }

    /// Gain the background channel should be at.
    pub fn background_gain_db(&self) -> f32 {
        if self.muted {
            MUTED_GAIN_DB
        } else {
            UNMUTED_GAIN_DB
        }
    }
}
