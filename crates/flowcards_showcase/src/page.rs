// SPDX-License-Identifier: MIT OR Apache-2.0
//! Landing page with the featured issues carousel.

use crate::issues::{show_issue_card, FeaturedIssue};
use crate::settings::ShowcaseSettings;
use crate::theme::ShowcaseTheme;
use egui::{Align, Layout, RichText, ScrollArea};
use flowcards_engine::CarouselWidget;

/// Space below the carousel so it can be scrolled out of view
const TRAILING_CONTENT_HEIGHT: f32 = 1200.0;

/// The showcase page
pub struct ShowcasePage {
    carousel: CarouselWidget<FeaturedIssue>,
    theme: ShowcaseTheme,
    /// Last issue the user clicked
    selected: Option<u32>,
}

impl ShowcasePage {
    /// Build the page from settings
    pub fn new(ctx: &egui::Context, settings: &ShowcaseSettings) -> Self {
        let theme = ShowcaseTheme::from_preset(settings.theme);
        theme.apply(ctx);
        tracing::debug!(
            "Page theme {}, {} issues",
            settings.theme.name(),
            settings.issues.len()
        );

        let carousel = CarouselWidget::new(ctx, &settings.issues, settings.carousel)
            .with_item_height(settings.item_height);

        Self {
            carousel,
            theme,
            selected: None,
        }
    }

    /// Last clicked issue id
    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    /// Draw the page
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.header(ui);
                    ui.add_space(16.0);
                    self.featured(ui);
                    ui.add_space(24.0);
                    self.trailing(ui);
                });
        });
    }

    fn header(&self, ui: &mut egui::Ui) {
        ui.add_space(32.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Featured Issues")
                    .size(32.0)
                    .strong()
                    .color(self.theme.text),
            );
            ui.label(
                RichText::new("Stories where design, technology and culture meet")
                    .size(14.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn featured(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let mut clicked = None;

        self.carousel.show(ui, |ui, issue, slot| {
            if show_issue_card(ui, issue, slot, &theme).clicked() {
                clicked = Some(issue.id);
            }
        });

        if let Some(id) = clicked {
            if let Some(issue) = self.issue(id) {
                tracing::info!("Clicked issue {}: {}", issue.id, issue.title);
            }
            self.selected = Some(id);
        }

        let status = if self.carousel.carousel().is_animating() {
            "Autoplay running"
        } else {
            "Autoplay paused"
        };
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.label(RichText::new(status).small().color(self.theme.text_muted));
        });
    }

    fn trailing(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("More Stories").color(self.theme.text));
            ui.label(
                RichText::new("Scroll the carousel out of view and it stops until it comes back.")
                    .color(self.theme.text_muted),
            );
            if let Some(issue) = self.selected.and_then(|id| self.issue(id)) {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("Selected: {} ({})", issue.title, issue.category))
                        .color(self.theme.secondary),
                );
            }
        });
        ui.add_space(TRAILING_CONTENT_HEIGHT);
    }

    fn issue(&self, id: u32) -> Option<&FeaturedIssue> {
        self.carousel
            .carousel()
            .sequence()
            .iter()
            .map(|(_, issue)| issue)
            .find(|issue| issue.id == id)
    }
}
