use super::line_map::LineMap;
use crate::model::{Block, Heading, Point, TextRange};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Paragraph or list item whose text is being collected
struct BlockFrame {
    start: Point,
    text: String,
    /// A nested list opened; later text belongs to the children
    sealed: bool,
}

pub(crate) struct ParseResult {
    pub headings: Vec<Heading>,
    pub blocks: Vec<Block>,
}

pub(crate) fn parse_markdown(text: &str) -> ParseResult {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_WIKILINKS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let parser = Parser::new_ext(text, options);
    let line_map = LineMap::new(text);

    let mut headings = Vec::new();
    let mut blocks = Vec::new();

    let mut current_heading_level = 0;
    let mut pending_heading_text: Option<(String, Point)> = None;

    let mut open_blocks: Vec<BlockFrame> = Vec::new();

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Paragraph) | Event::Start(Tag::Item) => {
                open_blocks.push(BlockFrame {
                    start: line_map.offset_to_point(text, range.start),
                    text: String::new(),
                    sealed: false,
                });
            }
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Item) => {
                if let Some(frame) = open_blocks.pop() {
                    if let Some(id) = block_id(&frame.text) {
                        blocks.push(Block {
                            id: id.to_string(),
                            range: TextRange {
                                start: frame.start,
                                end: line_map.offset_to_point(text, range.end),
                            },
                        });
                    }
                }
            }
            Event::Start(Tag::List(_)) => {
                if let Some(parent) = open_blocks.last_mut() {
                    parent.sealed = true;
                }
            }

            Event::Start(Tag::Heading { level, .. }) => {
                current_heading_level = level as u8;
                let start = line_map.offset_to_point(text, range.start);
                pending_heading_text = Some((String::new(), start));
            }
            Event::End(TagEnd::Heading(..)) => {
                if let Some((heading_text, start_point)) = pending_heading_text.take() {
                    let end_point = line_map.offset_to_point(text, range.end);
                    let trimmed_text = heading_text.trim().to_string();

                    if !trimmed_text.is_empty() {
                        headings.push(Heading {
                            level: current_heading_level,
                            text: trimmed_text,
                            range: TextRange {
                                start: start_point,
                                end: end_point,
                            },
                        });
                    }
                }
            }

            Event::Text(cow_str) | Event::Code(cow_str) => {
                if let Some((ref mut heading_text, _)) = pending_heading_text.as_mut() {
                    heading_text.push_str(&cow_str);
                }
                if let Some(frame) = open_blocks.last_mut().filter(|f| !f.sealed) {
                    frame.text.push_str(&cow_str);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(frame) = open_blocks.last_mut().filter(|f| !f.sealed) {
                    frame.text.push('\n');
                }
            }
            _ => {}
        }
    }

    ParseResult { headings, blocks }
}

/// Trailing ` ^block-id` of a paragraph or list item
fn block_id(block_text: &str) -> Option<&str> {
    let trimmed = block_text.trim_end();
    let pos = trimmed.rfind('^')?;
    let id = &trimmed[pos + 1..];
    let preceded_by_space = trimmed[..pos]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);

    (preceded_by_space
        && !id.is_empty()
        && id.chars().all(|c| c.is_alphanumeric() || c == '-'))
    .then_some(id)
}
