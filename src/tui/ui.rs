//! Frame layout. Builds every component from `App` and `TuiState` each draw.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ title bar (1 row)            │
//! │ config banner (if no key)    │
//! │ message list       [toast]   │
//! │ input box (3..7 rows)        │
//! └──────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ConfigBanner, MessageList, NoticeToast, TitleBar};

/// Areas for one frame.
struct UiLayout {
    title: Rect,
    banner: Option<Rect>,
    messages: Rect,
    input: Rect,
}

fn compute_layout(area: Rect, show_banner: bool, input_height: u16) -> UiLayout {
    use Constraint::{Length, Min};

    if show_banner {
        let banner_height = ConfigBanner::height(area.width);
        let [title, banner, messages, input] = Layout::vertical([
            Length(1),
            Length(banner_height),
            Min(0),
            Length(input_height),
        ])
        .areas(area);
        UiLayout {
            title,
            banner: Some(banner),
            messages,
            input,
        }
    } else {
        let [title, messages, input] =
            Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(area);
        UiLayout {
            title,
            banner: None,
            messages,
            input,
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, frame_index: usize) {
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = compute_layout(frame.area(), !app.is_configured(), input_height);

    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.awaiting_reply,
        frame_index,
    )
    .render(frame, layout.messages);

    // Title after the list so the unseen flag reflects this frame's layout
    TitleBar::new(
        app.settings.model.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, layout.title);

    if let Some(banner_area) = layout.banner {
        ConfigBanner.render(frame, banner_area);
    }

    tui.input_box.render(frame, layout.input);

    if let Some(notice) = &app.notice {
        NoticeToast::new(notice).render(frame, layout.messages);
    }
}
