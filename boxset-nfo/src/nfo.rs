use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use boxset_core::MetadataFields;

use crate::error::NfoError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The parts of a Kodi-style movie NFO that boxset understands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieNfo {
    pub title: Option<String>,
    pub year: Option<u16>,
    pub plot: Option<String>,
    pub outline: Option<String>,
    pub genres: Vec<String>,
    pub studios: Vec<String>,
    pub mpaa: Option<String>,
    pub rating: Option<f32>,
    /// Collection name from `<set>Name</set>` or `<set><name>Name</name></set>`.
    pub set_name: Option<String>,
    pub set_overview: Option<String>,
    /// `tmdbcolid` attribute of `<set>`.
    pub set_tmdb_id: Option<u64>,
}

impl MovieNfo {
    /// Local metadata in the shared vocabulary.
    ///
    /// The collection's own overview wins over the movie plot, which wins
    /// over the short outline.
    pub fn fields(&self) -> MetadataFields {
        let overview = [&self.set_overview, &self.plot, &self.outline]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .cloned();

        MetadataFields {
            overview,
            genres: self.genres.clone(),
            studios: self.studios.clone(),
            content_rating: self.mpaa.clone(),
            community_rating: self.rating,
            tmdb_collection_id: self.set_tmdb_id,
        }
        .normalized()
    }
}

/// Parse a movie NFO file from disk.
pub fn parse_nfo_file(path: &Path) -> Result<MovieNfo, NfoError> {
    let bytes = std::fs::read(path)?;
    parse_nfo(bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]))
}

/// Parse a movie NFO.
///
/// The root element must be `<movie>`. Anything after the closing root tag
/// (Kodi allows a trailing scraper URL) is ignored.
pub fn parse_nfo<R: BufRead>(reader: R) -> Result<MovieNfo, NfoError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut nfo = MovieNfo::default();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut seen_root = false;

    // Ratings block state: (is default, first value seen)
    let mut rating_is_default = false;
    let mut default_rating: Option<f32> = None;
    let mut first_rating: Option<f32> = None;
    let mut plain_rating: Option<f32> = None;
    let mut premiered_year: Option<u16> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = tag_name(e);
                if path.is_empty() {
                    check_root(&tag, seen_root)?;
                    seen_root = true;
                } else if path.len() == 1 && tag == "set" {
                    if let Some(id) = read_set_id(e)? {
                        nfo.set_tmdb_id = Some(id);
                    }
                } else if path_is(&path, &["movie", "ratings"]) && tag == "rating" {
                    rating_is_default = attribute_is_true(e, b"default")?;
                }
                path.push(tag);
                text.clear();
            }
            Event::Empty(ref e) => {
                let tag = tag_name(e);
                if path.is_empty() {
                    // `<movie/>` is structurally valid but carries nothing
                    check_root(&tag, seen_root)?;
                    break;
                }
                if path.len() == 1 && tag == "set" {
                    if let Some(id) = read_set_id(e)? {
                        nfo.set_tmdb_id = Some(id);
                    }
                }
            }
            Event::Text(ref e) => {
                if !path.is_empty() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if !path.is_empty() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => {
                let value = std::mem::take(&mut text);
                let value = value.trim();
                let segments: Vec<&str> = path.iter().map(String::as_str).collect();
                match segments.as_slice() {
                    ["movie", "title"] => nfo.title = non_empty(value),
                    ["movie", "year"] => nfo.year = parse_year(value),
                    ["movie", "premiered"] => premiered_year = parse_year(value),
                    ["movie", "plot"] => nfo.plot = non_empty(value),
                    ["movie", "outline"] => nfo.outline = non_empty(value),
                    ["movie", "genre"] => push_non_empty(&mut nfo.genres, value),
                    ["movie", "studio"] => push_non_empty(&mut nfo.studios, value),
                    ["movie", "mpaa"] => nfo.mpaa = non_empty(value),
                    ["movie", "rating"] => plain_rating = value.parse().ok(),
                    ["movie", "ratings", "rating", "value"] => {
                        let parsed = value.parse().ok();
                        if rating_is_default && default_rating.is_none() {
                            default_rating = parsed;
                        }
                        if first_rating.is_none() {
                            first_rating = parsed;
                        }
                    }
                    ["movie", "set"] => {
                        // Old style: `<set>Name</set>`
                        if nfo.set_name.is_none() {
                            nfo.set_name = non_empty(value);
                        }
                    }
                    ["movie", "set", "name"] => nfo.set_name = non_empty(value),
                    ["movie", "set", "overview"] => nfo.set_overview = non_empty(value),
                    _ => {}
                }
                path.pop();
                if path.is_empty() {
                    break;
                }
            }
            Event::Eof => {
                if !seen_root {
                    return Err(NfoError::invalid_nfo("no <movie> element found"));
                }
                return Err(NfoError::invalid_nfo("unexpected end of file inside <movie>"));
            }
            _ => {}
        }
        buf.clear();
    }

    if nfo.year.is_none() {
        nfo.year = premiered_year;
    }
    nfo.rating = plain_rating.or(default_rating).or(first_rating);

    Ok(nfo)
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

fn check_root(tag: &str, seen_root: bool) -> Result<(), NfoError> {
    if seen_root {
        return Err(NfoError::invalid_nfo("multiple root elements"));
    }
    if tag != "movie" {
        return Err(NfoError::invalid_nfo(format!(
            "root element is <{tag}>, expected <movie>"
        )));
    }
    Ok(())
}

fn path_is(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

fn read_set_id(e: &BytesStart<'_>) -> Result<Option<u64>, NfoError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"tmdbcolid" {
            let value = String::from_utf8_lossy(&attr.value);
            return Ok(value.trim().parse().ok().filter(|id| *id != 0));
        }
    }
    Ok(None)
}

fn attribute_is_true(e: &BytesStart<'_>, key: &[u8]) -> Result<bool, NfoError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(attr.value.as_ref().eq_ignore_ascii_case(b"true"));
        }
    }
    Ok(false)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn push_non_empty(list: &mut Vec<String>, value: &str) {
    if !value.is_empty() {
        list.push(value.to_string());
    }
}

/// Parse a year from `1984` or the start of `1984-12-14`.
fn parse_year(value: &str) -> Option<u16> {
    value
        .get(..4)
        .and_then(|y| y.parse().ok())
        .filter(|y| *y > 0)
}

#[cfg(test)]
#[path = "tests/nfo_tests.rs"]
mod tests;
