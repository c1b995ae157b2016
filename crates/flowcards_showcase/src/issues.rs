// SPDX-License-Identifier: MIT OR Apache-2.0
//! Featured issue cards shown in the carousel.

use crate::theme::ShowcaseTheme;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use flowcards_engine::SlotState;
use serde::{Deserialize, Serialize};

/// Height of the cover area of a card
const COVER_HEIGHT: f32 = 400.0;
const CARD_ROUNDING: f32 = 4.0;
const CONTENT_PADDING: f32 = 16.0;

/// Cover gradients, picked by issue id
const COVER_PALETTE: [(Color32, Color32); 5] = [
    (Color32::from_rgb(88, 40, 120), Color32::from_rgb(20, 12, 40)),
    (Color32::from_rgb(150, 70, 60), Color32::from_rgb(35, 15, 20)),
    (Color32::from_rgb(30, 90, 120), Color32::from_rgb(8, 20, 35)),
    (Color32::from_rgb(40, 110, 90), Color32::from_rgb(10, 30, 25)),
    (Color32::from_rgb(60, 60, 140), Color32::from_rgb(12, 12, 35)),
];

/// One magazine issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedIssue {
    /// Issue id
    pub id: u32,
    /// Cover title
    pub title: String,
    /// Cover subtitle
    pub subtitle: String,
    /// Category badge text
    pub category: String,
    /// Publication date, `YYYY-MM-DD`
    pub date: String,
    /// Page count
    pub pages: u32,
}

impl FeaturedIssue {
    /// Create an issue
    pub fn new(
        id: u32,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        pages: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            subtitle: subtitle.into(),
            category: category.into(),
            date: date.into(),
            pages,
        }
    }

    /// Date as `M/D/YYYY`; the raw text when it is not an ISO date
    pub fn display_date(&self) -> String {
        let mut parts = self.date.splitn(3, '-').map(str::parse::<u32>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(year)), Some(Ok(month)), Some(Ok(day)))
                if (1..=12).contains(&month) && (1..=31).contains(&day) =>
            {
                format!("{month}/{day}/{year}")
            }
            _ => self.date.clone(),
        }
    }

    fn cover_colors(&self) -> (Color32, Color32) {
        COVER_PALETTE[self.id as usize % COVER_PALETTE.len()]
    }
}

/// The issues featured on the landing page
pub fn default_issues() -> Vec<FeaturedIssue> {
    vec![
        FeaturedIssue::new(
            1,
            "UNEXPECTED AI BEAUTY",
            "Exploring the Harmony Between Humanity and Nature Through Digital Art",
            "Tech & Art",
            "2024-10-01",
            105,
        ),
        FeaturedIssue::new(
            2,
            "ENCODED COUTURE",
            "Aesthetic Intelligence Meets Machine Made Fashion",
            "Fashion",
            "2024-12-01",
            105,
        ),
        FeaturedIssue::new(
            3,
            "EMOTIVE MACHINES",
            "DNA of Intelligent Empathy in Modern Technology",
            "Psychology",
            "2024-12-01",
            105,
        ),
        FeaturedIssue::new(
            4,
            "DIGITAL DREAMS",
            "Virtual Reality and the Future of Human Experience",
            "VR/AR",
            "2024-11-15",
            98,
        ),
        FeaturedIssue::new(
            5,
            "QUANTUM LEAP",
            "Breaking Barriers in Computational Science",
            "Science",
            "2025-01-20",
            120,
        ),
    ]
}

/// Draw one issue card filling `ui`'s max rect; returns the click response
pub fn show_issue_card(
    ui: &mut egui::Ui,
    issue: &FeaturedIssue,
    slot: SlotState,
    theme: &ShowcaseTheme,
) -> egui::Response {
    let rect = ui.max_rect();
    let response = ui.interact(rect, ui.id().with("issue_card"), Sense::click());
    let painter = ui.painter().clone();

    let cover = Rect::from_min_size(rect.min, Vec2::new(rect.width(), COVER_HEIGHT.min(rect.height())));
    let info = Rect::from_min_max(Pos2::new(rect.left(), cover.bottom()), rect.max);

    // Cover background with a darkening gradient towards the bottom
    let (top, bottom) = issue.cover_colors();
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(cover.left_top(), top);
    mesh.colored_vertex(cover.right_top(), top);
    mesh.colored_vertex(cover.right_bottom(), bottom);
    mesh.colored_vertex(cover.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));

    let border = if slot.hovered { theme.accent } else { theme.border };
    painter.rect_stroke(rect, CARD_ROUNDING, Stroke::new(1.0, border));
    painter.rect_filled(info, 0.0, theme.card);

    // Category badge
    let badge_galley = painter.layout_no_wrap(
        issue.category.clone(),
        FontId::proportional(11.0),
        Color32::WHITE,
    );
    let badge = Rect::from_min_size(
        cover.min + Vec2::splat(CONTENT_PADDING),
        badge_galley.size() + Vec2::new(20.0, 8.0),
    );
    painter.rect_filled(badge, badge.height() / 2.0, theme.primary);
    painter.galley(badge.min + Vec2::new(10.0, 4.0), badge_galley, Color32::WHITE);

    // Brand dots
    for (i, color) in [theme.primary, theme.secondary, theme.accent].into_iter().enumerate() {
        let center = Pos2::new(
            cover.right() - CONTENT_PADDING - 5.0 - (2 - i) as f32 * 14.0,
            cover.top() + CONTENT_PADDING + 8.0,
        );
        painter.circle_filled(center, 5.0, color.gamma_multiply(0.7));
    }

    // Cover text
    let text_left = cover.left() + CONTENT_PADDING;
    let text_width = cover.width() - 2.0 * CONTENT_PADDING;
    let meta_y = cover.bottom() - CONTENT_PADDING;
    painter.text(
        Pos2::new(text_left, meta_y),
        Align2::LEFT_BOTTOM,
        format!("{} Pages", issue.pages),
        FontId::proportional(11.0),
        Color32::from_white_alpha(200),
    );
    painter.text(
        Pos2::new(cover.right() - CONTENT_PADDING, meta_y),
        Align2::RIGHT_BOTTOM,
        issue.display_date(),
        FontId::proportional(11.0),
        Color32::from_white_alpha(200),
    );

    let subtitle = painter.layout(
        issue.subtitle.clone(),
        FontId::proportional(13.0),
        Color32::from_white_alpha(230),
        text_width,
    );
    let subtitle_pos = Pos2::new(text_left, meta_y - 24.0 - subtitle.size().y);
    let title_color = if slot.hovered { theme.accent_light } else { Color32::WHITE };
    let title = painter.layout(
        issue.title.clone(),
        FontId::proportional(20.0),
        title_color,
        text_width,
    );
    let title_pos = subtitle_pos - Vec2::new(0.0, title.size().y + 8.0);
    painter.galley(title_pos, title, title_color);
    painter.galley(subtitle_pos, subtitle, Color32::WHITE);

    // Info section
    let center_x = info.center().x;
    painter.text(
        Pos2::new(center_x, info.top() + CONTENT_PADDING),
        Align2::CENTER_TOP,
        &issue.title,
        FontId::proportional(15.0),
        if slot.hovered { theme.primary } else { theme.text },
    );
    painter.text(
        Pos2::new(center_x, info.top() + CONTENT_PADDING + 26.0),
        Align2::CENTER_TOP,
        format!("{} PGs \u{2022} {}", issue.pages, issue.display_date()),
        FontId::proportional(12.0),
        theme.text_muted,
    );
    painter.text(
        Pos2::new(center_x, info.top() + CONTENT_PADDING + 50.0),
        Align2::CENTER_TOP,
        "Learn More \u{203a}",
        FontId::proportional(13.0),
        theme.secondary,
    );

    response.on_hover_text(format!("Learn more about {}", issue.title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_issues() {
        let issues = default_issues();
        assert_eq!(issues.len(), 5);
        assert_eq!(issues[0].title, "UNEXPECTED AI BEAUTY");
        assert_eq!(issues[4].pages, 120);
    }

    #[test]
    fn test_display_date() {
        let issue = FeaturedIssue::new(1, "T", "S", "C", "2024-10-01", 1);
        assert_eq!(issue.display_date(), "10/1/2024");

        let issue = FeaturedIssue::new(1, "T", "S", "C", "Autumn 2024", 1);
        assert_eq!(issue.display_date(), "Autumn 2024");

        let issue = FeaturedIssue::new(1, "T", "S", "C", "2024-13-01", 1);
        assert_eq!(issue.display_date(), "2024-13-01");
    }

    #[test]
    fn test_cover_colors_cycle() {
        let first = FeaturedIssue::new(0, "T", "S", "C", "2024-01-01", 1);
        let sixth = FeaturedIssue::new(5, "T", "S", "C", "2024-01-01", 1);
        assert_eq!(first.cover_colors(), sixth.cover_colors());
    }
}
