//! Block-level markdown splitting for report display
//!
//! Reports come back as markdown. Headings, bullet and numbered lists, pipe
//! tables and paragraphs are recognised; inline markup stays as typed.

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    List(Vec<String>),
    OrderedList(Vec<String>),
    /// `header` is empty when the table has no `|---|` separator row
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    Paragraph(String),
}

/// Multi-line block being collected
enum Pending<'a> {
    None,
    Paragraph(Vec<&'a str>),
    List(Vec<String>),
    OrderedList(Vec<String>),
    Table(Vec<&'a str>),
}

impl Pending<'_> {
    fn flush(&mut self, blocks: &mut Vec<Block>) {
        match std::mem::replace(self, Pending::None) {
            Pending::None => {}
            Pending::Paragraph(lines) => blocks.push(Block::Paragraph(lines.join(" "))),
            Pending::List(items) => blocks.push(Block::List(items)),
            Pending::OrderedList(items) => blocks.push(Block::OrderedList(items)),
            Pending::Table(lines) => blocks.push(table(&lines)),
        }
    }
}

pub fn parse_blocks(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending = Pending::None;

    for raw in source.lines() {
        let line = raw.trim();

        if line.is_empty() {
            pending.flush(&mut blocks);
        } else if let Some((level, text)) = heading(line) {
            pending.flush(&mut blocks);
            blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
        } else if let Some(item) = list_item(line) {
            if !matches!(pending, Pending::List(_)) {
                pending.flush(&mut blocks);
                pending = Pending::List(Vec::new());
            }
            if let Pending::List(items) = &mut pending {
                items.push(item.to_string());
            }
        } else if let Some(item) = ordered_item(line) {
            if !matches!(pending, Pending::OrderedList(_)) {
                pending.flush(&mut blocks);
                pending = Pending::OrderedList(Vec::new());
            }
            if let Pending::OrderedList(items) = &mut pending {
                items.push(item.to_string());
            }
        } else if line.starts_with('|') {
            if !matches!(pending, Pending::Table(_)) {
                pending.flush(&mut blocks);
                pending = Pending::Table(Vec::new());
            }
            if let Pending::Table(lines) = &mut pending {
                lines.push(line);
            }
        } else {
            if !matches!(pending, Pending::Paragraph(_)) {
                pending.flush(&mut blocks);
                pending = Pending::Paragraph(Vec::new());
            }
            if let Pending::Paragraph(lines) = &mut pending {
                lines.push(line);
            }
        }
    }

    pending.flush(&mut blocks);
    blocks
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    // "#hashtag" is not a heading
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((level as u8, rest.trim()))
}

fn list_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

/// "1. text" or "1) text"
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(str::trim)
}

fn cells(line: &str) -> Vec<String> {
    let inner = line.trim().trim_start_matches('|');
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

fn is_separator(line: &str) -> bool {
    let cells = cells(line);
    !cells.is_empty()
        && cells.iter().all(|c| {
            let dashes = c.trim_start_matches(':').trim_end_matches(':');
            !dashes.is_empty() && dashes.chars().all(|ch| ch == '-')
        })
}

fn table(lines: &[&str]) -> Block {
    match lines {
        [first, second, rest @ ..] if is_separator(second) => Block::Table {
            header: cells(first),
            rows: rest.iter().map(|l| cells(l)).collect(),
        },
        _ => Block::Table {
            header: Vec::new(),
            rows: lines.iter().map(|l| cells(l)).collect(),
        },
    }
}
