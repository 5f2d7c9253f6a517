//! XML form of the launch history
//!
//! ```xml
//! <launchHistory>
//!   <launch memento="..." mode="debug" label="..."/>
//!   <lastLaunch memento="..." mode="run" label="..."/>
//! </launchHistory>
//! ```
//!
//! Element names are matched case-insensitively on read and unknown
//! elements are skipped.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use tracing::warn;

use super::list::Append;
use super::LaunchHistory;
use crate::error::{Error, Result};
use crate::models::{ConfigRef, HistoryEntry, LaunchMode};

const ROOT_NODE: &str = "launchHistory";
const LAUNCH_NODE: &str = "launch";
const LAST_LAUNCH_NODE: &str = "lastLaunch";
const MEMENTO_ATT: &str = "memento";
const MODE_ATT: &str = "mode";
const LABEL_ATT: &str = "label";

fn document_error(e: impl std::fmt::Display) -> Error {
    Error::Document(e.to_string())
}

fn parse_error(e: impl std::fmt::Display) -> Error {
    Error::Parse(e.to_string())
}

fn record<'a>(name: &'a str, entry: &'a HistoryEntry) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    element.push_attribute((MEMENTO_ATT, entry.configuration.as_str()));
    element.push_attribute((MODE_ATT, entry.mode.as_str()));
    element.push_attribute((LABEL_ATT, entry.label.as_str()));
    element
}

/// Debug entries first, then run entries, then the latest launch
pub(super) fn write(history: &LaunchHistory) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(document_error)?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT_NODE)))
        .map_err(document_error)?;

    for mode in LaunchMode::ALL {
        for entry in history.history(mode) {
            writer
                .write_event(Event::Empty(record(LAUNCH_NODE, entry)))
                .map_err(document_error)?;
        }
    }
    if let Some(entry) = history.most_recent() {
        writer
            .write_event(Event::Empty(record(LAST_LAUNCH_NODE, entry)))
            .map_err(document_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT_NODE)))
        .map_err(document_error)?;

    String::from_utf8(writer.into_inner()).map_err(document_error)
}

fn is_named(element: &BytesStart<'_>, name: &str) -> bool {
    element.name().as_ref().eq_ignore_ascii_case(name.as_bytes())
}

fn read_record(element: &BytesStart<'_>) -> Result<HistoryEntry> {
    let mut memento = None;
    let mut mode = None;
    let mut label = None;

    for attribute in element.attributes() {
        let attribute = attribute.map_err(parse_error)?;
        let value = attribute.unescape_value().map_err(parse_error)?.into_owned();
        match attribute.key.as_ref() {
            key if key == MEMENTO_ATT.as_bytes() => memento = Some(value),
            key if key == MODE_ATT.as_bytes() => mode = Some(value),
            key if key == LABEL_ATT.as_bytes() => label = Some(value),
            _ => {}
        }
    }

    let memento = memento
        .filter(|m| !m.is_empty())
        .ok_or_else(|| Error::Parse("launch record without a memento".into()))?;
    let mode = mode
        .ok_or_else(|| Error::Parse(format!("launch record {memento} without a mode")))?
        .parse::<LaunchMode>()
        .map_err(parse_error)?;

    Ok(HistoryEntry::new(
        ConfigRef(memento),
        mode,
        label.unwrap_or_default(),
    ))
}

fn restore_launch(history: &mut LaunchHistory, entry: HistoryEntry) {
    let mode = entry.mode;
    let memento = entry.configuration.clone();
    match history.list_mut(mode).append(entry) {
        Append::Appended => {}
        Append::Duplicate => {
            warn!(memento = %memento, %mode, "Skipping duplicate history entry")
        }
        Append::Full => {
            warn!(memento = %memento, %mode, "Skipping history entry beyond capacity")
        }
    }
}

/// Handle a child of the root element
fn read_child(history: &mut LaunchHistory, element: &BytesStart<'_>) -> Result<()> {
    if is_named(element, LAUNCH_NODE) {
        restore_launch(history, read_record(element)?);
    } else if is_named(element, LAST_LAUNCH_NODE) {
        history.most_recent = Some(read_record(element)?);
    }
    Ok(())
}

fn check_root(element: &BytesStart<'_>, seen_root: &mut bool) -> Result<()> {
    if *seen_root {
        return Err(Error::Parse("more than one root element".into()));
    }
    if !is_named(element, ROOT_NODE) {
        return Err(Error::Parse(format!(
            "unexpected root element <{}>",
            String::from_utf8_lossy(element.name().as_ref())
        )));
    }
    *seen_root = true;
    Ok(())
}

pub(super) fn read(document: &str) -> Result<LaunchHistory> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut history = LaunchHistory::new();
    let mut seen_root = false;
    let mut depth = 0usize;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(Error::Parse(format!(
                    "{e} (at byte {})",
                    reader.buffer_position()
                )))
            }
        };

        match event {
            Event::Start(element) => {
                match depth {
                    0 => check_root(&element, &mut seen_root)?,
                    1 => read_child(&mut history, &element)?,
                    _ => {}
                }
                depth += 1;
            }
            Event::Empty(element) => match depth {
                0 => check_root(&element, &mut seen_root)?,
                1 => read_child(&mut history, &element)?,
                _ => {}
            },
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(Error::Parse("text outside the root element".into()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::Parse("document has no root element".into()));
    }
    if depth != 0 {
        return Err(Error::Parse("document ends inside an element".into()));
    }
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<launchHistory>
  <launch memento="d1" mode="debug" label="Debug one"/>
  <launch memento="r1" mode="run" label="Run one"/>
  <launch memento="r2" mode="run" label="Run two"/>
  <lastLaunch memento="r1" mode="run" label="Run one"/>
</launchHistory>
"#;

    fn mementos(history: &LaunchHistory, mode: LaunchMode) -> Vec<&str> {
        history
            .history(mode)
            .iter()
            .map(|e| e.configuration.as_str())
            .collect()
    }

    #[test]
    fn test_read_sample() {
        let history = read(SAMPLE).unwrap();
        assert_eq!(mementos(&history, LaunchMode::Debug), vec!["d1"]);
        assert_eq!(mementos(&history, LaunchMode::Run), vec!["r1", "r2"]);
        let recent = history.most_recent().unwrap();
        assert_eq!(recent.configuration.as_str(), "r1");
        assert_eq!(recent.mode, LaunchMode::Run);
        assert_eq!(recent.label, "Run one");
    }

    #[test]
    fn test_write_layout() {
        let history = read(SAMPLE).unwrap();
        let text = write(&history).unwrap();

        assert!(text.starts_with("<?xml"));
        let debug_at = text.find(r#"memento="d1""#).unwrap();
        let run_at = text.find(r#"memento="r2""#).unwrap();
        let last_at = text.find("<lastLaunch").unwrap();
        assert!(debug_at < run_at && run_at < last_at);
    }

    #[test]
    fn test_empty_history() {
        let text = write(&LaunchHistory::new()).unwrap();
        let history = read(&text).unwrap();
        assert!(history.is_empty());

        assert!(read("<launchHistory/>").unwrap().is_empty());
    }

    #[test]
    fn test_names_case_insensitive_and_unknown_skipped() {
        let text = r#"<LAUNCHHISTORY>
            <Launch memento="a" mode="run" label="A"/>
            <favorite memento="z" mode="run" label="Z"/>
            <launch memento="b" mode="run"></launch>
        </LAUNCHHISTORY>"#;
        let history = read(text).unwrap();
        assert_eq!(mementos(&history, LaunchMode::Run), vec!["a", "b"]);
        assert_eq!(history.history(LaunchMode::Run)[1].label, "");
        assert!(history.most_recent().is_none());
    }

    #[test]
    fn test_restore_enforces_list_invariants() {
        let mut text = String::from("<launchHistory>");
        for name in ["a", "a", "b", "c", "d", "e", "f"] {
            text.push_str(&format!(r#"<launch memento="{name}" mode="debug" label="{name}"/>"#));
        }
        text.push_str("</launchHistory>");

        let history = read(&text).unwrap();
        assert_eq!(
            mementos(&history, LaunchMode::Debug),
            vec!["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn test_malformed_documents() {
        let cases = [
            "",
            "not xml at all",
            "<launchHistory>",
            "<launchHistory><launch memento=\"a\" mode=\"run\"></launchHistory>",
            "<history/>",
            "<launchHistory/><launchHistory/>",
            r#"<launchHistory><launch mode="run" label="x"/></launchHistory>"#,
            r#"<launchHistory><launch memento="a" label="x"/></launchHistory>"#,
            r#"<launchHistory><launch memento="a" mode="profile"/></launchHistory>"#,
        ];
        for case in cases {
            assert!(
                matches!(read(case), Err(Error::Parse(_))),
                "expected parse failure for {case:?}"
            );
        }
    }
}
