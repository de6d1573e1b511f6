use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};
use vibespec_core::{ProjectAnswer, WizardStep};

/// Sidebar listing every wizard step with the current one highlighted and
/// completed ones checked.
pub fn render(frame: &mut Frame, area: Rect, current: WizardStep, answer: &ProjectAnswer) {
    let items: Vec<ListItem> = WizardStep::ALL
        .iter()
        .map(|step| {
            let (marker, style) = if *step == current {
                ("▸", Style::default().fg(Color::Cyan).bold())
            } else if step.index() < current.index() && step.can_advance(answer) {
                ("✓", Style::default().fg(Color::Green))
            } else {
                (" ", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} {}. ", step.index() + 1), style),
                Span::styled(step.display_name(), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(" Steps ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(List::new(items).block(block), area);
}
