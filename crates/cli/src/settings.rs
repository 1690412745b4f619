use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use vpnclick_core::ScreenPoint;
use vpnclick_engine::ReconnectPlan;
use vpnclick_gui::{ClickDelays, ClickTargets};
use vpnclick_notify::TelegramConfig;
use vpnclick_status::StatusConfig;

/// Runtime settings, read once at startup from flags, the environment and `.env`.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// X of the VPN client icon
    #[arg(long, env = "ICON_X", default_value_t = 32)]
    pub icon_x: i32,

    /// Y of the VPN client icon
    #[arg(long, env = "ICON_Y", default_value_t = 607)]
    pub icon_y: i32,

    /// X of the VPN tab
    #[arg(long, env = "TAB_X", default_value_t = 122)]
    pub tab_x: i32,

    /// Y of the VPN tab
    #[arg(long, env = "TAB_Y", default_value_t = 79)]
    pub tab_y: i32,

    /// X of the Connect/Disconnect button
    #[arg(long, env = "BUTTON_X", default_value_t = 309)]
    pub button_x: i32,

    /// Y of the Connect/Disconnect button
    #[arg(long, env = "BUTTON_Y", default_value_t = 528)]
    pub button_y: i32,

    /// Seconds to wait after clicking the icon
    #[arg(long, env = "WAKEUP_DELAY", default_value_t = 5)]
    pub wakeup_delay: u64,

    /// Seconds to wait after clicking the VPN tab
    #[arg(long, env = "TAB_DELAY", default_value_t = 2)]
    pub tab_delay: u64,

    /// Seconds to wait after clicking the button
    #[arg(long, env = "CHECK_DELAY", default_value_t = 15)]
    pub check_delay: u64,

    /// Seconds between a disconnect attempt and its status check
    #[arg(long, env = "SETTLE_DELAY", default_value_t = 5)]
    pub settle_delay: u64,

    /// Seconds between a confirmed disconnect and the reconnect
    #[arg(long, env = "STABILIZE_DELAY", default_value_t = 20)]
    pub stabilize_delay: u64,

    /// VPN client CLI, invoked as `<path> status`
    #[arg(long, env = "VPN_CLI_PATH", default_value = "/opt/cisco/anyconnect/bin/vpn")]
    pub vpn_cli_path: PathBuf,

    /// Status output substring that means connected
    #[arg(long, env = "VPN_STATUS_MARKER", default_value = "state: Connected")]
    pub vpn_status_marker: String,

    /// Seconds before the status command is abandoned
    #[arg(long, env = "VPN_STATUS_TIMEOUT", default_value_t = 10)]
    pub vpn_status_timeout: u64,

    /// Log file (appended to, alongside console output)
    #[arg(long, env = "LOG_FILE", default_value = "/var/log/cisco-reconnector.log")]
    pub log_file: PathBuf,

    /// Telegram bot token (alerts disabled when empty)
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", default_value = "", hide_env_values = true)]
    pub telegram_bot_token: String,

    /// Telegram chat id (alerts disabled when empty)
    #[arg(long, env = "TELEGRAM_CHAT_ID", default_value = "")]
    pub telegram_chat_id: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = "https://api.telegram.org")]
    pub telegram_api_url: String,

    /// Seconds before an alert request is abandoned
    #[arg(long, env = "TELEGRAM_TIMEOUT", default_value_t = 10)]
    pub telegram_timeout: u64,
}

impl Settings {
    pub fn targets(&self) -> ClickTargets {
        ClickTargets {
            icon: ScreenPoint::new(self.icon_x, self.icon_y),
            tab: ScreenPoint::new(self.tab_x, self.tab_y),
            button: ScreenPoint::new(self.button_x, self.button_y),
        }
    }

    pub fn delays(&self) -> ClickDelays {
        ClickDelays {
            after_icon: Duration::from_secs(self.wakeup_delay),
            after_tab: Duration::from_secs(self.tab_delay),
            after_button: Duration::from_secs(self.check_delay),
        }
    }

    pub fn plan(&self) -> ReconnectPlan {
        ReconnectPlan {
            settle: Duration::from_secs(self.settle_delay),
            stabilize: Duration::from_secs(self.stabilize_delay),
        }
    }

    pub fn status(&self) -> StatusConfig {
        StatusConfig {
            program: self.vpn_cli_path.clone(),
            marker: self.vpn_status_marker.clone(),
            timeout: Duration::from_secs(self.vpn_status_timeout),
            ..Default::default()
        }
    }

    pub fn telegram(&self) -> TelegramConfig {
        TelegramConfig {
            bot_token: self.telegram_bot_token.clone(),
            chat_id: self.telegram_chat_id.clone(),
            api_base: self.telegram_api_url.clone(),
            timeout: Duration::from_secs(self.telegram_timeout),
            ..Default::default()
        }
    }
}
