//! Pane geometry.
//!
//! ```text
//! +--------------+--------------------------------+
//! | Mounts (30)  | Keys                           |
//! |              |                                |
//! +--------------+-------------------+------------+
//! | Log                              | Legend (24)|  9 rows
//! +----------------------------------+------------+
//! ```
//!
//! The secret panes cover the whole top area without a frame. Prompts are
//! three-row boxes centred on the screen, sized to the path they mention.

use ratatui::layout::Rect;

use super::ViewName;

pub const SIDE_WIDTH: u16 = 30;
pub const BOTTOM_HEIGHT: u16 = 9;
pub const LEGEND_WIDTH: u16 = 24;
pub const PROMPT_HEIGHT: u16 = 3;
/// Room for the frame and the fixed words of a prompt message.
pub const PROMPT_PADDING: usize = 19;
/// Extra room in the add prompt for typing the new leaf name.
pub const ADD_PROMPT_EXTRA: usize = 5;

/// Returns the rectangle of `name` on a `screen`-sized terminal.
///
/// `hint` is the length of the path a prompt shows; other panes ignore it.
pub fn rect_for(name: ViewName, screen: Rect, hint: usize) -> Rect {
    let top_height = screen.height.saturating_sub(BOTTOM_HEIGHT);
    let bottom_y = screen.y + top_height;
    let bottom_height = screen.height - top_height;
    let side_width = SIDE_WIDTH.min(screen.width);

    match name {
        ViewName::Side => Rect::new(screen.x, screen.y, side_width, top_height),
        ViewName::Main => Rect::new(
            screen.x + side_width,
            screen.y,
            screen.width - side_width,
            top_height,
        ),
        ViewName::Log => Rect::new(
            screen.x,
            bottom_y,
            screen.width.saturating_sub(LEGEND_WIDTH),
            bottom_height,
        ),
        ViewName::Legend => {
            let width = LEGEND_WIDTH.min(screen.width);
            Rect::new(
                screen.x + screen.width - width,
                bottom_y,
                width,
                bottom_height,
            )
        }
        ViewName::Secret | ViewName::EditSecret => {
            Rect::new(screen.x, screen.y, screen.width, top_height)
        }
        ViewName::DeleteKeyPrompt | ViewName::SavePrompt => {
            centered(screen, hint + PROMPT_PADDING)
        }
        ViewName::AddKeyPrompt => centered(screen, hint + PROMPT_PADDING + ADD_PROMPT_EXTRA),
    }
}

fn centered(screen: Rect, width: usize) -> Rect {
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(screen.width);
    let height = PROMPT_HEIGHT.min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn test_permanent_panes_tile_the_screen() {
        let side = rect_for(ViewName::Side, screen(), 0);
        let main = rect_for(ViewName::Main, screen(), 0);
        let log = rect_for(ViewName::Log, screen(), 0);
        let legend = rect_for(ViewName::Legend, screen(), 0);

        assert_eq!(side, Rect::new(0, 0, 30, 31));
        assert_eq!(main, Rect::new(30, 0, 90, 31));
        assert_eq!(log, Rect::new(0, 31, 96, 9));
        assert_eq!(legend, Rect::new(96, 31, 24, 9));
    }

    #[test]
    fn test_secret_covers_top_area() {
        assert_eq!(
            rect_for(ViewName::EditSecret, screen(), 0),
            Rect::new(0, 0, 120, 31)
        );
    }

    #[test]
    fn test_prompts_are_centred_and_sized_to_path() {
        let prompt = rect_for(ViewName::DeleteKeyPrompt, screen(), 11);
        assert_eq!(prompt, Rect::new(45, 18, 30, 3));

        let add = rect_for(ViewName::AddKeyPrompt, screen(), 11);
        assert_eq!(add.width, 35);
    }

    #[test]
    fn test_tiny_screen_does_not_overflow() {
        let tiny = Rect::new(0, 0, 10, 5);
        for name in ViewName::ALL {
            let rect = rect_for(name, tiny, 200);
            assert!(rect.right() <= tiny.right(), "{name:?} overflows");
            assert!(rect.bottom() <= tiny.bottom(), "{name:?} overflows");
        }
    }
}
