//! Table text parsers.

use std::collections::HashSet;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::TableParseError;

/// One entry per non-empty line.
pub fn parse_line_table(text: &str) -> HashSet<String> {
    text.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sea names from the NCEI vocabulary document.
///
/// Collects the text of every `seaname` element that sits inside a
/// `seaname` element directly below the root:
///
/// ```xml
/// <seanames>
///   <seaname><seaname>Gulf of Mexico</seaname><seacode>..</seacode></seaname>
/// </seanames>
/// ```
pub fn parse_sea_names_xml(xml: &str) -> Result<HashSet<String>, TableParseError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut names = HashSet::new();
    let mut path: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                seen_root = true;
                path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Empty(_) => {
                seen_root = true;
            }
            Event::Text(t) if is_sea_name(&path) => {
                names.insert(t.unescape()?.into_owned());
            }
            Event::CData(t) if is_sea_name(&path) => {
                names.insert(String::from_utf8_lossy(&t.into_inner()).into_owned());
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = path.pop() {
        return Err(TableParseError::Unclosed(open));
    }
    if !seen_root {
        return Err(TableParseError::NoRoot);
    }
    Ok(names)
}

fn is_sea_name(path: &[String]) -> bool {
    matches!(path, [_, outer, inner] if outer == "seaname" && inner == "seaname")
}
