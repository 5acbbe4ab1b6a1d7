use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

pub struct Loading {
    message: String,
}

impl Loading {
    pub fn new(message: &str) -> Loading {
        return Loading {
            message: message.to_string(),
        };
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        frame.render_widget(
            Paragraph::new(self.message.to_string())
                .style(Style::default().add_modifier(Modifier::ITALIC))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 1, 0)),
                )
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center),
            rect,
        );
    }
}
