//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields set by the parent:
//! - `TitleBar`: App name, model and transient status
//! - `ConfigBanner`: Warning shown while no API key is configured
//! - `MessageBubble`: One transcript message
//! - `TypingIndicator`: Animated dots while a reply is pending
//! - `NoticeToast`: Overlay for the current error notice
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Multi-line composer, emits `InputEvent::Submit`
//! - `MessageList`: Scrollable conversation view with layout caching
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`.
//! The parent (`ui::draw_ui`) reads the state and builds each component:
//!
//! ```rust,ignore
//! TitleBar::new(app.settings.model.clone(), app.status_message.clone(), unseen)
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── title_bar.rs         (Top status bar)
//! ├── config_banner.rs     (Missing API key warning)
//! ├── message.rs           (Single message bubble)
//! ├── message_list.rs      (Scrollable message container)
//! ├── typing_indicator.rs  (Pending reply animation)
//! ├── notice_toast.rs      (Error overlay)
//! └── input_box/           (Text input with hard-wrap layout)
//! ```

pub mod config_banner;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod notice_toast;
pub mod title_bar;
pub mod typing_indicator;

pub use config_banner::ConfigBanner;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use notice_toast::NoticeToast;
pub use title_bar::TitleBar;
