use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use boxset_core::{Field, ImageKind};

use crate::error::WriteError;
use crate::{Descriptor, DescriptorFormat};

/// Content rating written when none is known ("not rated").
const NOT_RATED: &str = "NR";

/// Jellyfin/Emby `collection.xml` in a `<Name> [Boxset]` folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionXml;

impl CollectionXml {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorFormat for CollectionXml {
    fn name(&self) -> &'static str {
        "Jellyfin collection.xml"
    }

    fn file_name(&self) -> &'static str {
        "collection.xml"
    }

    fn folder_name(&self, collection_name: &str) -> String {
        format!("{} [Boxset]", sanitize_name(collection_name))
    }

    fn render(&self, doc: &Descriptor<'_>) -> Result<Vec<u8>, WriteError> {
        let collection = doc.collection;
        let fields = &collection.fields;
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), Some("yes"))))?;
        xml.write_event(Event::Start(BytesStart::new("Item")))?;

        let rating = fields
            .content_rating
            .as_deref()
            .filter(|_| fields.is_present(Field::ContentRating))
            .unwrap_or(NOT_RATED);
        write_text(&mut xml, "ContentRating", rating)?;
        write_text(&mut xml, "LockData", "false")?;
        if let Some(overview) = fields
            .overview
            .as_deref()
            .filter(|_| fields.is_present(Field::Overview))
        {
            write_text(&mut xml, "Overview", overview)?;
        }
        write_text(&mut xml, "LocalTitle", &collection.name)?;
        write_text(&mut xml, "DisplayOrder", "PremiereDate")?;
        if let Some(score) = fields
            .community_rating
            .filter(|_| fields.is_present(Field::CommunityRating))
        {
            write_text(&mut xml, "CommunityRating", &format!("{score:.1}"))?;
        }
        if let Some(id) = fields
            .tmdb_collection_id
            .filter(|_| fields.is_present(Field::TmdbCollectionId))
        {
            write_text(&mut xml, "TmdbCollectionId", &id.to_string())?;
        }
        write_list(&mut xml, "Genres", "Genre", &fields.genres)?;
        write_list(&mut xml, "Studios", "Studio", &fields.studios)?;

        let art: Vec<(ImageKind, &Path)> = [ImageKind::Poster, ImageKind::Banner]
            .into_iter()
            .filter_map(|kind| doc.art.get(kind).map(|p| (kind, p)))
            .collect();
        if !art.is_empty() {
            xml.write_event(Event::Start(BytesStart::new("Art")))?;
            for (kind, path) in art {
                let tag = match kind {
                    ImageKind::Poster => "Poster",
                    ImageKind::Banner => "Banner",
                };
                write_text(&mut xml, tag, &path.to_string_lossy())?;
            }
            xml.write_event(Event::End(BytesEnd::new("Art")))?;
        }

        xml.write_event(Event::Start(BytesStart::new("CollectionItems")))?;
        for path in &doc.item_paths {
            xml.write_event(Event::Start(BytesStart::new("CollectionItem")))?;
            write_text(&mut xml, "Path", &path.to_string_lossy())?;
            xml.write_event(Event::End(BytesEnd::new("CollectionItem")))?;
        }
        xml.write_event(Event::End(BytesEnd::new("CollectionItems")))?;

        xml.write_event(Event::End(BytesEnd::new("Item")))?;

        let mut bytes = xml.into_inner();
        bytes.write_all(b"\n")?;
        Ok(bytes)
    }
}

fn write_text<W: Write>(xml: &mut Writer<W>, tag: &str, value: &str) -> Result<(), WriteError> {
    xml.write_event(Event::Start(BytesStart::new(tag)))?;
    xml.write_event(Event::Text(BytesText::new(value)))?;
    xml.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_list<W: Write>(
    xml: &mut Writer<W>,
    outer: &str,
    inner: &str,
    values: &[String],
) -> Result<(), WriteError> {
    let values: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        return Ok(());
    }
    xml.write_event(Event::Start(BytesStart::new(outer)))?;
    for value in values {
        write_text(xml, inner, value)?;
    }
    xml.write_event(Event::End(BytesEnd::new(outer)))?;
    Ok(())
}

/// Make a collection name safe for use as a folder name.
///
/// Path separators become " - " (so "AC/DC" stays readable), characters
/// Windows rejects are dropped, and trailing dots and spaces are trimmed.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '/' | '\\' => out.push_str(" - "),
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => {}
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    let trimmed = out.trim().trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        "Unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "tests/collection_xml_tests.rs"]
mod tests;
