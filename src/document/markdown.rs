use pulldown_cmark::{Event, Parser, TagEnd};

/// Render markdown to the text a reader sees: prose and code are kept,
/// markup, link targets and raw HTML are dropped.
pub fn visible_text(content: &str) -> String {
    let mut out = String::with_capacity(content.len());

    for event in Parser::new(content) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableRow,
            ) => out.push('\n'),
            Event::End(TagEnd::TableCell) => out.push(' '),
            _ => {}
        }
    }

    out
}
