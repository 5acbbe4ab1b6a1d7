#[cfg(test)]
#[path = "screen_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Margin;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use super::AssessmentView;
use super::RelatedVerbs;
use super::ResultsView;
use super::SaveButtonView;
use super::Scroll;
use super::SectionView;
use super::ViewModel;
use crate::domain::models::Loading;

fn bold() -> Style {
    return Style::default().add_modifier(Modifier::BOLD);
}

fn labelled(label: &str, value: &str) -> Line<'static> {
    return Line::from(vec![
        Span::styled(format!("{label}: "), bold()),
        Span::raw(value.to_string()),
    ]);
}

/// Number of terminal rows the lines take up once wrapped to `width`.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows = lines
        .iter()
        .map(|line| {
            let line_width = line.width();
            if line_width == 0 {
                return 1;
            }
            return (line_width + width - 1) / width;
        })
        .sum::<usize>();

    return u16::try_from(rows).unwrap_or(u16::MAX);
}

fn assessment_lines(assessment: &AssessmentView) -> Vec<Line<'static>> {
    let mut lines = vec![
        labelled("Complexity", &assessment.complexity),
        labelled("Overview", &assessment.overview),
        labelled("Notes", &assessment.notes),
        labelled("Recommended", &assessment.recommended_practice),
        Line::from(""),
        Line::from(Span::styled("Choose how to practice:", bold())),
    ];

    for option in &assessment.options {
        let mut spans = vec![
            Span::styled(format!("[{}] ", option.hotkey), bold()),
            Span::raw(option.label),
        ];
        if option.recommended {
            spans.push(Span::styled(
                " (recommended)",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }

    return lines;
}

fn results_lines(results: &ResultsView) -> Vec<Line<'static>> {
    let related = match &results.related_verbs {
        RelatedVerbs::Tags(verbs) => verbs
            .iter()
            .map(|verb| return format!("[{verb}]"))
            .collect::<Vec<String>>()
            .join(" "),
        RelatedVerbs::Placeholder(text) => text.to_string(),
    };

    let mut lines = vec![
        labelled("Overview", &results.overview),
        labelled("Notes", &results.notes),
        labelled("Related verbs", &related),
        Line::from(""),
    ];

    if let Some(placeholder) = results.placeholder {
        lines.push(Line::from(Span::styled(
            placeholder,
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        return lines;
    }

    for card in &results.cards {
        lines.push(Line::from(Span::styled(
            card.front(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for back in card.back() {
            lines.push(Line::from(format!("  {back}")));
        }
        lines.push(Line::from(""));
    }

    return lines;
}

fn section_block(title: &str) -> Block<'_> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(Padding::new(1, 1, 0, 0))
        .title(title);
}

fn render_scrollable<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    scroll: &mut Scroll,
) {
    let block = section_block(title);
    let inner = block.inner(rect);
    scroll.set_lengths(wrapped_height(&lines, inner.width), inner.height);

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll.position, 0)),
        rect,
    );
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scroll.scrollbar_state,
    );
}

fn render_section<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    section: &SectionView,
    scroll: &mut Scroll,
) {
    match section {
        SectionView::Idle => {
            frame.render_widget(
                Paragraph::new("Type a Spanish verb and press Enter to study it.")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(section_block("")),
                rect,
            );
        }
        SectionView::Loading(message) => {
            Loading::new(message).render(frame, rect);
        }
        SectionView::Assessment(assessment) => {
            render_scrollable(
                frame,
                rect,
                &assessment.title,
                assessment_lines(assessment),
                scroll,
            );
        }
        SectionView::Results(results) => {
            render_scrollable(frame, rect, &results.title, results_lines(results), scroll);
        }
        SectionView::Error(message) => {
            frame.render_widget(
                Paragraph::new(message.to_string())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true })
                    .block(
                        section_block("Error")
                            .border_style(Style::default().fg(Color::Red)),
                    ),
                rect,
            );
        }
    }
}

fn save_bar(count_label: &str, save_button: &SaveButtonView) -> Line<'static> {
    let style = if save_button.confirmed {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if save_button.enabled {
        bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    return Line::from(vec![
        Span::raw(format!("{count_label}  ")),
        Span::styled(format!("[Ctrl+S] {}", save_button.label), style),
    ]);
}

fn hints_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let spans = hints
        .iter()
        .flat_map(|(key, label)| {
            return vec![
                Span::styled(key.to_string(), bold()),
                Span::styled(
                    format!(" {label}   "),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
        })
        .collect::<Vec<Span>>();

    return Line::from(spans);
}

/// Draws the whole study screen for one frame.
pub fn render<B: Backend>(
    frame: &mut Frame<B>,
    view: &ViewModel,
    textarea: &tui_textarea::TextArea,
    scroll: &mut Scroll,
) {
    let notice_height = if view.notice.is_some() { 1 } else { 0 };
    let save_height = if matches!(view.section, SectionView::Results(_)) {
        1
    } else {
        0
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(notice_height),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(save_height),
            Constraint::Length(1),
        ])
        .split(frame.size());

    if let Some(notice) = &view.notice {
        frame.render_widget(
            Paragraph::new(notice.to_string()).style(Style::default().fg(Color::Yellow)),
            layout[0],
        );
    }

    frame.render_widget(textarea.widget(), layout[1]);
    render_section(frame, layout[2], &view.section, scroll);

    if let SectionView::Results(results) = &view.section {
        frame.render_widget(
            Paragraph::new(save_bar(&results.count_label, &view.save_button)),
            layout[3],
        );
    }

    frame.render_widget(Paragraph::new(hints_line(&view.hints)), layout[4]);
}
