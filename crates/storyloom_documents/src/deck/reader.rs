//! Recovers slide text and pictures from an existing `.pptx` package.
//!
//! Only top-level shapes are read: text shapes contribute their paragraphs and
//! pictures their bytes and placement. Group shapes, tables and charts are
//! ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use storyloom_core::Geometry;
use storyloom_error::{DocumentError, DocumentErrorKind, StoryloomResult};
use zip::ZipArchive;
use zip::result::ZipError;

/// A picture recovered from a slide.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SourcePicture {
    /// Encoded image
    bytes: Vec<u8>,
    /// Extension of the media part, lowercase
    extension: String,
    /// Placement, if the shape declares one
    geometry: Option<Geometry>,
}

/// Text and pictures of one source slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct SourceSlide {
    /// Paragraph texts of every text shape, in shape order
    paragraphs: Vec<String>,
    /// Pictures in shape order
    pictures: Vec<SourcePicture>,
}

impl SourceSlide {
    /// All paragraphs joined with newlines, or `None` when there is no visible text.
    pub fn text(&self) -> Option<String> {
        let joined = self.paragraphs.join("\n");
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// Slides of a source deck in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct SourceDeck {
    /// Slides in order
    slides: Vec<SourceSlide>,
}

fn package_error(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::new(DocumentErrorKind::Package(e.to_string()))
}

fn xml_error(part: &str, e: impl std::fmt::Display) -> DocumentError {
    DocumentError::new(DocumentErrorKind::Xml {
        part: part.to_string(),
        message: e.to_string(),
    })
}

fn read_bytes<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> StoryloomResult<Vec<u8>> {
    let mut entry = archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => {
            DocumentError::new(DocumentErrorKind::MissingPart(name.to_string()))
        }
        other => package_error(other),
    })?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).map_err(package_error)?;
    Ok(bytes)
}

fn read_xml<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> StoryloomResult<String> {
    let bytes = read_bytes(archive, name)?;
    String::from_utf8(bytes).map_err(|e| xml_error(name, e).into())
}

/// Value of the first attribute with `local_name`, optionally requiring a prefix.
fn attribute(element: &BytesStart<'_>, local_name: &[u8], prefixed: bool) -> Option<String> {
    element
        .attributes()
        .filter_map(Result::ok)
        .find(|attr| {
            attr.key.local_name().as_ref() == local_name && attr.key.prefix().is_some() == prefixed
        })
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

fn numeric(element: &BytesStart<'_>, name: &[u8]) -> i64 {
    attribute(element, name, false)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Resolves a relationship target relative to the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Directory and rels part name for a part, e.g. `ppt/slides` and
/// `ppt/slides/_rels/slide1.xml.rels` for `ppt/slides/slide1.xml`.
fn rels_for(part: &str) -> (String, String) {
    match part.rsplit_once('/') {
        Some((dir, file)) => (dir.to_string(), format!("{dir}/_rels/{file}.rels")),
        None => (String::new(), format!("_rels/{part}.rels")),
    }
}

/// Relationship id to resolved part name, skipping external targets.
fn relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    part: &str,
) -> StoryloomResult<HashMap<String, String>> {
    let (base_dir, rels_name) = rels_for(part);
    if archive.index_for_name(&rels_name).is_none() {
        return Ok(HashMap::new());
    }
    let xml = read_xml(archive, &rels_name)?;

    let mut map = HashMap::new();
    let mut reader = Reader::from_str(&xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let external = attribute(&e, b"TargetMode", false).is_some_and(|m| m == "External");
                if let (Some(id), Some(target), false) = (
                    attribute(&e, b"Id", false),
                    attribute(&e, b"Target", false),
                    external,
                ) {
                    map.insert(id, resolve_target(&base_dir, &target));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(&rels_name, e).into()),
            _ => {}
        }
    }
    Ok(map)
}

/// Slide part names in presentation order.
fn slide_parts<R: Read + Seek>(archive: &mut ZipArchive<R>) -> StoryloomResult<Vec<String>> {
    let part = "ppt/presentation.xml";
    let xml = read_xml(archive, part)?;
    let rels = relationships(archive, part)?;

    let mut slides = Vec::new();
    let mut reader = Reader::from_str(&xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sldId" => {
                let rel_id = attribute(&e, b"id", true).ok_or_else(|| {
                    xml_error(part, "slide entry without relationship id")
                })?;
                let target = rels.get(&rel_id).ok_or_else(|| {
                    DocumentError::new(DocumentErrorKind::MissingPart(format!(
                        "relationship {rel_id} of {part}"
                    )))
                })?;
                slides.push(target.clone());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e).into()),
            _ => {}
        }
    }
    Ok(slides)
}

#[derive(Default)]
struct PictureState {
    embed: Option<String>,
    in_xfrm: bool,
    offset: Option<(i64, i64)>,
    extent: Option<(i64, i64)>,
}

#[derive(Default)]
struct TextState {
    has_body: bool,
    paragraphs: Vec<String>,
    paragraph: Option<String>,
    in_run_text: bool,
}

/// A top-level picture before its media part is loaded.
struct PictureRef {
    embed: String,
    geometry: Option<Geometry>,
}

fn parse_slide(part: &str, xml: &str) -> StoryloomResult<(Vec<String>, Vec<PictureRef>)> {
    let mut paragraphs = Vec::new();
    let mut pictures = Vec::new();
    let mut group_depth = 0usize;
    let mut text: Option<TextState> = None;
    let mut picture: Option<PictureState> = None;

    let mut reader = Reader::from_str(xml);
    loop {
        let event = reader.read_event().map_err(|e| xml_error(part, e))?;
        match event {
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == b"grpSp" {
                    group_depth += 1;
                    continue;
                }
                if group_depth > 0 {
                    continue;
                }
                match name.as_ref() {
                    b"sp" => text = Some(TextState::default()),
                    b"pic" => picture = Some(PictureState::default()),
                    b"txBody" => {
                        if let Some(state) = text.as_mut() {
                            state.has_body = true;
                        }
                    }
                    b"p" => {
                        if let Some(state) = text.as_mut().filter(|s| s.has_body) {
                            state.paragraph = Some(String::new());
                        }
                    }
                    b"t" => {
                        if let Some(state) = text.as_mut().filter(|s| s.paragraph.is_some()) {
                            state.in_run_text = true;
                        }
                    }
                    b"xfrm" => {
                        if let Some(state) = picture.as_mut() {
                            state.in_xfrm = true;
                        }
                    }
                    _ => picture_attributes(&e, picture.as_mut()),
                }
            }
            Event::Empty(e) => {
                if group_depth > 0 {
                    continue;
                }
                match e.local_name().as_ref() {
                    b"p" => {
                        if let Some(state) = text.as_mut().filter(|s| s.has_body) {
                            state.paragraphs.push(String::new());
                        }
                    }
                    b"br" => {
                        if let Some(paragraph) = text.as_mut().and_then(|s| s.paragraph.as_mut()) {
                            paragraph.push('\n');
                        }
                    }
                    _ => picture_attributes(&e, picture.as_mut()),
                }
            }
            Event::Text(t) => {
                if let Some(state) = text.as_mut().filter(|s| s.in_run_text) {
                    let value = t.unescape().map_err(|e| xml_error(part, e))?;
                    if let Some(paragraph) = state.paragraph.as_mut() {
                        paragraph.push_str(&value);
                    }
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                if name.as_ref() == b"grpSp" {
                    group_depth = group_depth.saturating_sub(1);
                    continue;
                }
                if group_depth > 0 {
                    continue;
                }
                match name.as_ref() {
                    b"t" => {
                        if let Some(state) = text.as_mut() {
                            state.in_run_text = false;
                        }
                    }
                    b"p" => {
                        if let Some(state) = text.as_mut() {
                            if let Some(paragraph) = state.paragraph.take() {
                                state.paragraphs.push(paragraph);
                            }
                        }
                    }
                    b"sp" => {
                        if let Some(state) = text.take() {
                            if state.has_body {
                                paragraphs.extend(state.paragraphs);
                            }
                        }
                    }
                    b"xfrm" => {
                        if let Some(state) = picture.as_mut() {
                            state.in_xfrm = false;
                        }
                    }
                    b"pic" => {
                        if let Some(state) = picture.take() {
                            match state.embed {
                                Some(embed) => pictures.push(PictureRef {
                                    embed,
                                    geometry: state.offset.zip(state.extent).map(
                                        |((x, y), (cx, cy))| Geometry::new(x, y, cx, cy),
                                    ),
                                }),
                                None => tracing::debug!(part, "Skipping linked picture"),
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok((paragraphs, pictures))
}

fn picture_attributes(element: &BytesStart<'_>, picture: Option<&mut PictureState>) {
    let Some(state) = picture else {
        return;
    };
    match element.local_name().as_ref() {
        b"blip" => {
            if let Some(embed) = attribute(element, b"embed", true) {
                state.embed = Some(embed);
            }
        }
        b"off" if state.in_xfrm => {
            state.offset = Some((numeric(element, b"x"), numeric(element, b"y")));
        }
        b"ext" if state.in_xfrm => {
            state.extent = Some((numeric(element, b"cx"), numeric(element, b"cy")));
        }
        _ => {}
    }
}

/// Reads every slide of a `.pptx` package from a reader.
///
/// # Errors
///
/// Fails if the container is not a zip, a required part is missing, or any
/// XML part is malformed.
pub fn read_deck_from<R: Read + Seek>(source: R) -> StoryloomResult<SourceDeck> {
    let mut archive = ZipArchive::new(source).map_err(package_error)?;
    let mut slides = Vec::new();

    for part in slide_parts(&mut archive)? {
        let xml = read_xml(&mut archive, &part)?;
        let rels = relationships(&mut archive, &part)?;
        let (paragraphs, picture_refs) = parse_slide(&part, &xml)?;

        let mut pictures = Vec::with_capacity(picture_refs.len());
        for picture in picture_refs {
            let media = rels.get(&picture.embed).ok_or_else(|| {
                DocumentError::new(DocumentErrorKind::MissingPart(format!(
                    "relationship {} of {}",
                    picture.embed, part
                )))
            })?;
            let bytes = read_bytes(&mut archive, media)?;
            let extension = media
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default();
            pictures.push(SourcePicture {
                bytes,
                extension,
                geometry: picture.geometry,
            });
        }

        slides.push(SourceSlide {
            paragraphs,
            pictures,
        });
    }

    Ok(SourceDeck { slides })
}

/// Reads every slide of the `.pptx` file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened or is not a well-formed deck.
pub fn read_deck(path: &Path) -> StoryloomResult<SourceDeck> {
    let file = File::open(path)
        .map_err(|e| package_error(format!("{}: {}", path.display(), e)))?;
    read_deck_from(file)
}
