//! Showcase wall.
//!
//! A vertically scrolling wall of work samples below the hero. Layout is done
//! in document space (y grows downward from the top of the content) and
//! mapped to nannou's centered window coordinates at draw time, so the card
//! geometry is independent of the window and fully testable.
//!
//! Each card's visibility ratio (overlap area over card area) is what
//! gates its clip's playback.

use nannou::prelude::*;
use std::path::{Path, PathBuf};

const CARD_HEIGHT: f32 = 260.0;
const CARD_GAP: f32 = 40.0;
const SIDE_MARGIN: f32 = 60.0;
const MUTE_BUTTON: f32 = 36.0;
const MUTE_PADDING: f32 = 16.0;

pub struct Card {
    pub title: String,
    pub blurb: String,
    pub clip_path: Option<PathBuf>,
}

pub struct Showcase {
    cards: Vec<Card>,
    scroll: f32,
}

impl Showcase {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, scroll: 0.0 }
    }

    /// Built-in wall. Cards without a clip path stay silent cards.
    pub fn with_default_cards() -> Self {
        let clip = |name: &str| Some(PathBuf::from(format!("assets/clips/{}.mp3", name)));
        Self::new(vec![
            Card {
                title: "Digital Marketing".into(),
                blurb: "Campaign reel, spring season".into(),
                clip_path: clip("digital_marketing"),
            },
            Card {
                title: "Brand Identity".into(),
                blurb: "Sound logo explorations".into(),
                clip_path: clip("brand_identity"),
            },
            Card {
                title: "Motion Design".into(),
                blurb: "Title sequences and loops".into(),
                clip_path: None,
            },
            Card {
                title: "Live Events".into(),
                blurb: "Stage visuals, tour recap".into(),
                clip_path: clip("live_events"),
            },
        ])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn clip_paths(&self) -> impl Iterator<Item = Option<&Path>> {
        self.cards.iter().map(|c| c.clip_path.as_deref())
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Total document height: one full viewport for the hero, then the wall.
    fn content_height(&self, bounds: Rect) -> f32 {
        let wall = self.cards.len() as f32 * (CARD_HEIGHT + CARD_GAP) + CARD_GAP;
        bounds.h() + wall
    }

    pub fn scroll_by(&mut self, delta: f32, bounds: Rect) {
        let max = (self.content_height(bounds) - bounds.h()).max(0.0);
        self.scroll = (self.scroll + delta).clamp(0.0, max);
    }

    /// The hero is drawn while any of its viewport-sized area remains on
    /// screen.
    pub fn hero_visible(&self, bounds: Rect) -> bool {
        self.scroll < bounds.h()
    }

    /// Card rectangle in window coordinates for the current scroll offset.
    pub fn card_rect(&self, idx: usize, bounds: Rect) -> Rect {
        // Document-space top of this card: below the hero viewport
        let doc_top = bounds.h() + CARD_GAP + idx as f32 * (CARD_HEIGHT + CARD_GAP);
        let screen_top = bounds.top() - doc_top + self.scroll;
        let width = bounds.w() - SIDE_MARGIN * 2.0;
        Rect::from_x_y_w_h(
            0.0,
            screen_top - CARD_HEIGHT / 2.0,
            width,
            CARD_HEIGHT,
        )
    }

    /// Fraction of the card's area currently inside the window, in [0, 1].
    pub fn visibility(&self, idx: usize, bounds: Rect) -> f32 {
        let card = self.card_rect(idx, bounds);
        match card.overlap(bounds) {
            Some(overlap) => (overlap.w() * overlap.h()) / (card.w() * card.h()),
            None => 0.0,
        }
    }

    fn mute_button_rect(&self, idx: usize, bounds: Rect) -> Rect {
        let card = self.card_rect(idx, bounds);
        Rect::from_x_y_w_h(
            card.right() - MUTE_PADDING - MUTE_BUTTON / 2.0,
            card.top() - MUTE_PADDING - MUTE_BUTTON / 2.0,
            MUTE_BUTTON,
            MUTE_BUTTON,
        )
    }

    /// Index of the card whose mute button sits under `pos`, if any.
    pub fn mute_button_hit(&self, pos: Point2, bounds: Rect) -> Option<usize> {
        (0..self.cards.len()).find(|&i| {
            self.cards[i].clip_path.is_some()
                && self.mute_button_rect(i, bounds).contains(pos)
        })
    }

    pub fn draw(&self, draw: &Draw, bounds: Rect, clip_muted: &[bool]) {
        let font_size = 18;
        let line_height = 24.0;

        for (i, card) in self.cards.iter().enumerate() {
            let rect = self.card_rect(i, bounds);
            if rect.overlap(bounds).is_none() {
                continue;
            }

            draw.rect()
                .xy(rect.xy())
                .wh(rect.wh())
                .color(rgba(0.08, 0.08, 0.12, 0.9))
                .stroke(rgba(1.0, 1.0, 1.0, 0.15))
                .stroke_weight(1.0);

            let text_left = rect.left() + 24.0;
            let title_y = rect.top() - 28.0;
            draw.text(&card.title)
                .xy(pt2(text_left, title_y))
                .wh(pt2(rect.w(), line_height).into())
                .left_justify()
                .no_line_wrap()
                .color(rgb(1.0, 1.0, 1.0))
                .font_size(font_size + 4);

            draw.text(&card.blurb)
                .xy(pt2(text_left, title_y - line_height * 1.4))
                .wh(pt2(rect.w(), line_height).into())
                .left_justify()
                .no_line_wrap()
                .color(rgba(1.0, 1.0, 1.0, 0.6))
                .font_size(font_size);

            if card.clip_path.is_some() {
                let button = self.mute_button_rect(i, bounds);
                let muted = clip_muted.get(i).copied().unwrap_or(true);
                let label = if muted { "unmute" } else { "mute" };
                draw.rect()
                    .xy(button.xy())
                    .wh(button.wh())
                    .color(rgba(1.0, 1.0, 1.0, if muted { 0.1 } else { 0.3 }))
                    .stroke(rgba(1.0, 1.0, 1.0, 0.5))
                    .stroke_weight(1.0);
                draw.text(label)
                    .xy(pt2(button.x(), button.bottom() - 12.0))
                    .color(rgba(1.0, 1.0, 1.0, 0.7))
                    .font_size(11);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::from_x_y_w_h(0.0, 0.0, 1280.0, 720.0)
    }

    fn wall(cards: usize) -> Showcase {
        Showcase::new(
            (0..cards)
                .map(|i| Card {
                    title: format!("Card {}", i),
                    blurb: String::new(),
                    clip_path: Some(PathBuf::from(format!("clip{}.mp3", i))),
                })
                .collect(),
        )
    }

    #[test]
    fn starts_at_the_hero() {
        let wall = wall(4);
        assert_eq!(wall.scroll(), 0.0);
        assert!(wall.hero_visible(window()));
    }

    #[test]
    fn cards_start_below_the_fold() {
        let wall = wall(4);
        for i in 0..4 {
            assert_eq!(wall.visibility(i, window()), 0.0);
        }
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut wall = wall(2);
        let bounds = window();

        wall.scroll_by(-500.0, bounds);
        assert_eq!(wall.scroll(), 0.0, "cannot scroll above the hero");

        wall.scroll_by(1.0e9, bounds);
        let max = wall.scroll();
        wall.scroll_by(100.0, bounds);
        assert_eq!(wall.scroll(), max, "cannot scroll past the last card");
    }

    #[test]
    fn scrolling_brings_cards_into_view() {
        let mut wall = wall(4);
        let bounds = window();

        // Scroll the hero plus the leading gap: card 0 sits right at the top
        wall.scroll_by(bounds.h() + CARD_GAP, bounds);
        assert!((wall.visibility(0, bounds) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn partial_overlap_yields_partial_ratio() {
        let mut wall = wall(4);
        let bounds = window();

        // Half of card 0 peeking above the bottom edge
        wall.scroll_by(CARD_GAP + CARD_HEIGHT / 2.0, bounds);
        let ratio = wall.visibility(0, bounds);
        assert!((ratio - 0.5).abs() < 1e-4, "got {}", ratio);
    }

    #[test]
    fn hero_scrolls_out() {
        let mut wall = wall(4);
        let bounds = window();
        wall.scroll_by(bounds.h(), bounds);
        assert!(!wall.hero_visible(bounds));
    }

    #[test]
    fn mute_hit_requires_a_clip() {
        let mut wall = wall(2);
        wall.cards[1].clip_path = None;
        let bounds = window();
        wall.scroll_by(bounds.h() + CARD_GAP, bounds);

        let button = wall.mute_button_rect(0, bounds);
        assert_eq!(wall.mute_button_hit(button.xy(), bounds), Some(0));

        let silent = wall.mute_button_rect(1, bounds);
        // Card 1 is offscreen or has no clip; its corner never registers
        assert_eq!(wall.mute_button_hit(silent.xy(), bounds), None);
    }
}
