//! Word (`.docx`) report template and the substitution that populates it.
//!
//! A template is parsed once into a [`Template`]: the package entries plus an
//! owned tree of `word/document.xml`. Population clones that tree, rewrites
//! the text-bearing units that contain a placeholder and writes a fresh
//! package. The parsed template is never mutated, so one instance can be
//! shared by every concurrent report.
//!
//! Text-bearing units are the paragraphs directly under the document body
//! and the paragraphs of every table cell, including cells of nested tables.

mod package;
mod xml;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reportcard_config::TemplateConfig;
use reportcard_core::ReportError;
use tracing::{debug, info, instrument};

use crate::placeholders::{KNOWN_PLACEHOLDERS, PlaceholderMap};
use package::PackageEntry;
use xml::{Element, Node, TextNode, XmlDocument};

const DOCUMENT_PART: &str = "word/document.xml";

const W_DOCUMENT: &[u8] = b"w:document";
const W_BODY: &[u8] = b"w:body";
const W_P: &[u8] = b"w:p";
const W_PPR: &[u8] = b"w:pPr";
const W_R: &[u8] = b"w:r";
const W_RPR: &[u8] = b"w:rPr";
const W_T: &[u8] = b"w:t";
const W_TAB: &[u8] = b"w:tab";
const W_BR: &[u8] = b"w:br";
const W_CR: &[u8] = b"w:cr";
const W_TBL: &[u8] = b"w:tbl";
const W_TR: &[u8] = b"w:tr";
const W_TC: &[u8] = b"w:tc";

/// A parsed, read-only word template.
#[derive(Debug, Clone)]
pub struct Template {
    entries: Vec<PackageEntry>,
    document_index: usize,
    document: XmlDocument,
}

impl Template {
    /// Reads and parses the template at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ReportError::template_load(format!("{}: {e}", path.display())))?;

        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReportError> {
        let entries = package::read_package(bytes).map_err(ReportError::template_load)?;

        let document_index = entries
            .iter()
            .position(|entry| entry.name == DOCUMENT_PART)
            .ok_or_else(|| ReportError::template_load(format!("{DOCUMENT_PART} is missing")))?;

        let document = XmlDocument::parse(&entries[document_index].data)
            .map_err(|e| ReportError::template_load(format!("{DOCUMENT_PART}: {e}")))?;

        let has_body = document
            .root()
            .filter(|root| root.is(W_DOCUMENT))
            .and_then(|root| root.first_child(W_BODY))
            .is_some();
        if !has_body {
            return Err(ReportError::template_load(format!(
                "{DOCUMENT_PART} has no document body"
            )));
        }

        Ok(Self {
            entries,
            document_index,
            document,
        })
    }

    /// Every `{Token}` found in the template's text-bearing units, sorted.
    pub fn placeholders(&self) -> Vec<String> {
        let mut found = BTreeSet::new();
        if let Some(body) = self.body() {
            visit_units(body, &mut |paragraph| scan_tokens(&unit_text(paragraph), &mut found));
        }
        found.into_iter().collect()
    }

    /// Known placeholder keys that do not occur anywhere in the template.
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        let found = self.placeholders();
        KNOWN_PLACEHOLDERS
            .iter()
            .copied()
            .filter(|key| !found.iter().any(|token| token.as_str() == *key))
            .collect()
    }

    /// Text of every text-bearing unit, in document order.
    pub fn unit_texts(&self) -> Vec<String> {
        let mut texts = Vec::new();
        if let Some(body) = self.body() {
            visit_units(body, &mut |paragraph| texts.push(unit_text(paragraph)));
        }
        texts
    }

    fn body(&self) -> Option<&Element> {
        self.document.root().and_then(|root| root.first_child(W_BODY))
    }
}

/// Populates templates with placeholder values.
pub struct TemplateEngine;

impl TemplateEngine {
    /// Writes a populated copy of `template` and returns the `.docx` bytes.
    ///
    /// Keys absent from `placeholders` are left in the text verbatim. The
    /// same template and map always produce the same bytes.
    #[instrument(skip_all, fields(placeholders = placeholders.len()))]
    pub fn populate(
        template: &Template,
        placeholders: &PlaceholderMap,
    ) -> Result<Vec<u8>, ReportError> {
        let mut document = template.document.clone();

        let body = document
            .root_mut()
            .and_then(|root| root.child_elements_mut().find(|child| child.is(W_BODY)))
            .ok_or_else(|| ReportError::template_render("document has no body"))?;

        let rewritten = populate_container(body, placeholders);
        debug!(rewritten, "Populated template units");

        let xml = document.to_bytes().map_err(ReportError::template_render)?;
        package::write_package(&template.entries, template.document_index, &xml)
            .map_err(ReportError::template_render)
    }
}

/// Where templates come from: reloaded from disk on every report, or parsed
/// once and shared.
#[derive(Debug, Clone)]
pub enum TemplateStore {
    Disk(PathBuf),
    Cached {
        path: PathBuf,
        template: Arc<Template>,
    },
}

impl TemplateStore {
    pub fn from_config(config: &TemplateConfig) -> Result<Self, ReportError> {
        if !config.cache {
            return Ok(Self::Disk(config.path.clone()));
        }

        let template = Template::load(&config.path)?;
        info!(path = %config.path.display(), "Report template cached");
        Ok(Self::Cached {
            path: config.path.clone(),
            template: Arc::new(template),
        })
    }

    /// A store over an already parsed template.
    pub fn in_memory(template: Template) -> Self {
        Self::Cached {
            path: PathBuf::from("(in-memory)"),
            template: Arc::new(template),
        }
    }

    pub fn load(&self) -> Result<Arc<Template>, ReportError> {
        match self {
            Self::Disk(path) => Template::load(path).map(Arc::new),
            Self::Cached { template, .. } => Ok(Arc::clone(template)),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Disk(path) | Self::Cached { path, .. } => path,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached { .. })
    }

    /// Whether a template is available without loading it.
    pub fn exists(&self) -> bool {
        match self {
            Self::Disk(path) => path.is_file(),
            Self::Cached { .. } => true,
        }
    }
}

fn visit_units<'a>(container: &'a Element, visit: &mut impl FnMut(&'a Element)) {
    for child in container.child_elements() {
        if child.is(W_P) {
            visit(child);
        } else if child.is(W_TBL) {
            for cell in table_cells(child) {
                visit_units(cell, visit);
            }
        }
    }
}

fn table_cells(table: &Element) -> impl Iterator<Item = &Element> {
    table
        .child_elements()
        .filter(|row| row.is(W_TR))
        .flat_map(|row| row.child_elements().filter(|cell| cell.is(W_TC)))
}

/// Rewrites the units of `container` and returns how many were changed.
fn populate_container(container: &mut Element, placeholders: &PlaceholderMap) -> usize {
    let mut rewritten = 0;
    for child in container.child_elements_mut() {
        if child.is(W_P) {
            if populate_paragraph(child, placeholders) {
                rewritten += 1;
            }
        } else if child.is(W_TBL) {
            for row in child.child_elements_mut().filter(|row| row.is(W_TR)) {
                for cell in row.child_elements_mut().filter(|cell| cell.is(W_TC)) {
                    rewritten += populate_container(cell, placeholders);
                }
            }
        }
    }
    rewritten
}

fn populate_paragraph(paragraph: &mut Element, placeholders: &PlaceholderMap) -> bool {
    let Some(text) = placeholders.substitute(&unit_text(paragraph)) else {
        return false;
    };

    let paragraph_properties = paragraph.first_child(W_PPR).cloned();
    let mut run = Element::new("w:r");
    if let Some(run_properties) = first_run_properties(paragraph) {
        run.push(Node::Element(run_properties));
    }
    append_text(&mut run, &text);

    paragraph.children.clear();
    if let Some(properties) = paragraph_properties {
        paragraph.push(Node::Element(properties));
    }
    paragraph.push(Node::Element(run));
    true
}

fn unit_text(paragraph: &Element) -> String {
    let mut text = String::new();
    collect_text(paragraph, &mut text);
    text
}

fn collect_text(element: &Element, out: &mut String) {
    for child in element.child_elements() {
        match child.name() {
            W_T => out.push_str(&child.text()),
            W_TAB => out.push('\t'),
            W_BR | W_CR => out.push('\n'),
            // nested paragraphs belong to text boxes, not to this unit
            W_P | W_PPR | W_RPR => {}
            _ => collect_text(child, out),
        }
    }
}

fn first_run_properties(element: &Element) -> Option<Element> {
    for child in element.child_elements() {
        if child.is(W_R) {
            return child.first_child(W_RPR).cloned();
        }
        if child.is(W_P) || child.is(W_PPR) {
            continue;
        }
        if let Some(found) = first_run_properties(child) {
            return Some(found);
        }
    }
    None
}

fn append_text(run: &mut Element, text: &str) {
    for (line_no, line) in text.split('\n').enumerate() {
        if line_no > 0 {
            run.push(Node::Element(Element::new("w:br")));
        }
        for (piece_no, piece) in line.split('\t').enumerate() {
            if piece_no > 0 {
                run.push(Node::Element(Element::new("w:tab")));
            }
            if !piece.is_empty() {
                let mut t = Element::new("w:t").with_attribute("xml:space", "preserve");
                t.push(Node::Text(TextNode::new(piece)));
                run.push(Node::Element(t));
            }
        }
    }
}

fn scan_tokens(text: &str, found: &mut BTreeSet<String>) {
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());

        if len > 0 && after[len..].starts_with('}') {
            found.insert(format!("{{{}}}", &after[..len]));
            rest = &after[len + 1..];
        } else {
            rest = after;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::FileOptions;

    const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;
    const FOOTER: &str = "<w:sectPr/></w:body></w:document>";

    fn docx(body: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer
            .write_all(format!("{HEADER}{body}{FOOTER}").as_bytes())
            .unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn paragraph(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    fn table(cells: &[&str]) -> String {
        let cells: String = cells
            .iter()
            .map(|c| format!("<w:tc><w:tcPr/>{}</w:tc>", paragraph(c)))
            .collect();
        format!("<w:tbl><w:tblPr/><w:tr>{cells}</w:tr></w:tbl>")
    }

    fn map(pairs: &[(&str, &str)]) -> PlaceholderMap {
        pairs.iter().copied().collect()
    }

    fn populated_texts(body: &str, placeholders: &PlaceholderMap) -> Vec<String> {
        let template = Template::from_bytes(&docx(body)).unwrap();
        let bytes = TemplateEngine::populate(&template, placeholders).unwrap();
        Template::from_bytes(&bytes).unwrap().unit_texts()
    }

    #[test]
    fn test_replaces_in_paragraphs_and_table_cells() {
        let body = format!(
            "{}{}",
            paragraph("Name: {StudentName}"),
            table(&["{StudentLIN}", "Class {StudentClass}"])
        );
        let values = map(&[
            ("{StudentName}", "Okello Peter"),
            ("{StudentLIN}", "ADM-001"),
            ("{StudentClass}", "S.2"),
        ]);

        assert_eq!(
            populated_texts(&body, &values),
            ["Name: Okello Peter", "ADM-001", "Class S.2"]
        );
    }

    #[test]
    fn test_nested_tables_are_scanned() {
        let inner = table(&["{Term}"]);
        let body = format!("<w:tbl><w:tr><w:tc>{inner}</w:tc></w:tr></w:tbl>");

        assert_eq!(populated_texts(&body, &map(&[("{Term}", "ONE")])), ["ONE"]);
    }

    #[test]
    fn test_unresolved_placeholder_passes_through() {
        let body = paragraph("{StudentName} / {Unknown}");
        let texts = populated_texts(&body, &map(&[("{StudentName}", "Amony")]));

        assert_eq!(texts, ["Amony / {Unknown}"]);
    }

    #[test]
    fn test_placeholder_split_across_runs() {
        let body = r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>{Student</w:t></w:r><w:r><w:t>Name}</w:t></w:r></w:p>"#;
        let template = Template::from_bytes(&docx(body)).unwrap();
        let bytes =
            TemplateEngine::populate(&template, &map(&[("{StudentName}", "A & B")])).unwrap();

        let populated = Template::from_bytes(&bytes).unwrap();
        assert_eq!(populated.unit_texts(), ["A & B"]);

        let xml = String::from_utf8(package::read_package(&bytes).unwrap()[1].data.clone()).unwrap();
        assert!(xml.contains(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">A &amp; B</w:t></w:r></w:p>"#));
    }

    #[test]
    fn test_tabs_and_breaks_survive_rewrite() {
        let body = "<w:p><w:r><w:t>{Term}</w:t><w:tab/><w:t>x</w:t><w:br/><w:t>y</w:t></w:r></w:p>";
        assert_eq!(
            populated_texts(body, &map(&[("{Term}", "ONE")])),
            ["ONE\tx\ny"]
        );
    }

    #[test]
    fn test_untouched_units_keep_their_markup() {
        let body = r#"<w:p><w:r><w:rPr><w:i/></w:rPr><w:t>static</w:t></w:r></w:p>"#;
        let template = Template::from_bytes(&docx(body)).unwrap();
        let bytes = TemplateEngine::populate(&template, &map(&[("{Term}", "ONE")])).unwrap();

        let xml = String::from_utf8(package::read_package(&bytes).unwrap()[1].data.clone()).unwrap();
        assert_eq!(xml, format!("{HEADER}{body}{FOOTER}"));
    }

    #[test]
    fn test_populate_is_idempotent() {
        let template = Template::from_bytes(&docx(&paragraph("{Year}"))).unwrap();
        let values = map(&[("{Year}", "2025")]);

        let first = TemplateEngine::populate(&template, &values).unwrap();
        let second = TemplateEngine::populate(&template, &values).unwrap();
        assert_eq!(first, second);
        assert_eq!(template.unit_texts(), ["{Year}"]);
    }

    #[test]
    fn test_placeholders_listing() {
        let body = format!(
            "{}{}",
            paragraph("{Year} {Term} {not a token} {}"),
            table(&["{StudentName}", "{Term}"])
        );
        let template = Template::from_bytes(&docx(&body)).unwrap();

        assert_eq!(
            template.placeholders(),
            ["{StudentName}", "{Term}", "{Year}"]
        );

        let missing = template.missing_placeholders();
        assert_eq!(missing.len(), KNOWN_PLACEHOLDERS.len() - 3);
        assert!(missing.contains(&"{SchoolName}"));
        assert!(!missing.contains(&"{Term}"));
    }

    #[test]
    fn test_load_errors() {
        let missing = Template::load("/nonexistent/report_template.docx").unwrap_err();
        assert!(matches!(missing, ReportError::TemplateLoad(_)));

        let garbage = Template::from_bytes(b"plain text").unwrap_err();
        assert!(matches!(garbage, ReportError::TemplateLoad(_)));

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/styles.xml", FileOptions::default()).unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let no_document = writer.finish().unwrap().into_inner();
        assert_eq!(
            Template::from_bytes(&no_document).unwrap_err(),
            ReportError::TemplateLoad("word/document.xml is missing".to_string())
        );
    }

    #[test]
    fn test_store_modes() {
        let template = Template::from_bytes(&docx(&paragraph("x"))).unwrap();
        let store = TemplateStore::in_memory(template);
        assert!(store.is_cached());
        assert!(store.exists());
        assert!(store.load().is_ok());

        let disk = TemplateStore::Disk(PathBuf::from("/nonexistent/report_template.docx"));
        assert!(!disk.exists());
        assert!(matches!(disk.load(), Err(ReportError::TemplateLoad(_))));
    }
}
