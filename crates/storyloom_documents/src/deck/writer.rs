//! Serializes a [`Deck`] to a `.pptx` package.

use super::model::{Deck, Picture, Shape, Slide, SlideLayout};
use super::parts::{
    self, APP_PROPS, BODY, CENTRED_TITLE, CORE_PROPS, LAYOUT_RELS, NS_A, NS_P, NS_R, PRES_PROPS,
    REL_IMAGE, REL_LAYOUT, ROOT_RELS, SLIDE_MASTER, SLIDE_MASTER_RELS, SUBTITLE, TABLE_STYLES,
    THEME, TITLE, VIEW_PROPS, XML_DECL,
};
use quick_xml::escape::escape;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use storyloom_core::Geometry;
use storyloom_error::{DocumentError, DocumentErrorKind, StoryloomResult};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn package_error(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::new(DocumentErrorKind::Package(e.to_string()))
}

/// Drops characters XML 1.0 cannot carry.
fn xml_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|ch| *ch == '\t' || !ch.is_control())
        .collect();
    escape(cleaned.as_str()).into_owned()
}

fn xfrm(geometry: &Geometry) -> String {
    format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        geometry.x, geometry.y, geometry.width, geometry.height
    )
}

/// Text body with one paragraph per line, every run at `size` hundredths of a point.
fn text_body(text: &str, size: u32, align_left: bool) -> String {
    let paragraph_props = if align_left { r#"<a:pPr algn="l"/>"# } else { "" };
    let mut xml = String::from("<p:txBody><a:bodyPr/><a:lstStyle/>");
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            xml.push_str(&format!(
                r#"<a:p>{paragraph_props}<a:endParaRPr lang="en-US" sz="{size}" dirty="0"/></a:p>"#
            ));
        } else {
            xml.push_str(&format!(
                r#"<a:p>{paragraph_props}<a:r><a:rPr lang="en-US" sz="{size}" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
                xml_text(line)
            ));
        }
    }
    xml.push_str("</p:txBody>");
    xml
}

fn text_shape(id: usize, name: &str, ph: &str, geometry: &Geometry, body: String) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr><p:spPr>{}</p:spPr>{body}</p:sp>"#,
        xfrm(geometry)
    )
}

fn picture_shape(id: usize, rel_id: &str, geometry: &Geometry) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        id - 1,
        xfrm(geometry)
    )
}

/// Slide XML plus the pictures it references, keyed by relationship id.
fn slide_xml(slide: &Slide, size: u32) -> (String, Vec<(String, &Picture)>) {
    let mut shapes = String::new();
    let mut pictures = Vec::new();
    for (i, shape) in slide.shapes().iter().enumerate() {
        let id = i + 2;
        match shape {
            Shape::Title(text) => {
                let (ph, geometry) = match slide.layout() {
                    SlideLayout::Title => (r#"<p:ph type="ctrTitle"/>"#, &CENTRED_TITLE),
                    _ => (r#"<p:ph type="title"/>"#, &TITLE),
                };
                shapes.push_str(&text_shape(
                    id,
                    &format!("Title {}", id - 1),
                    ph,
                    geometry,
                    text_body(text, size, false),
                ));
            }
            Shape::Subtitle(text) => shapes.push_str(&text_shape(
                id,
                &format!("Subtitle {}", id - 1),
                r#"<p:ph type="subTitle" idx="1"/>"#,
                &SUBTITLE,
                text_body(text, size, false),
            )),
            Shape::Body(text) => shapes.push_str(&text_shape(
                id,
                &format!("Content Placeholder {}", id - 1),
                r#"<p:ph idx="1"/>"#,
                &BODY,
                text_body(text, size, true),
            )),
            Shape::Picture(picture) => {
                let rel_id = format!("rId{}", pictures.len() + 2);
                shapes.push_str(&picture_shape(id, &rel_id, picture.geometry()));
                pictures.push((rel_id, picture));
            }
        }
    }

    let xml = format!(
        r#"{XML_DECL}
<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    );
    (xml, pictures)
}

/// Writes `deck` as a `.pptx` package, all text at `font_size_pt`.
///
/// # Errors
///
/// Fails only if the zip container cannot be written.
pub fn write_deck(deck: &Deck, font_size_pt: f32) -> StoryloomResult<Vec<u8>> {
    let size = (font_size_pt * 100.0).round() as u32;
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let put = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, data: &[u8]| {
        zip.start_file(name, options).map_err(package_error)?;
        zip.write_all(data).map_err(package_error)
    };

    let slide_count = deck.slides().len();
    let mut media_types: BTreeMap<String, &'static str> = BTreeMap::new();
    let mut slide_parts = Vec::with_capacity(slide_count);
    let mut media_parts = Vec::new();

    for (index, slide) in deck.slides().iter().enumerate() {
        let number = index + 1;
        let (xml, pictures) = slide_xml(slide, size);
        let mut rels = format!(
            r#"{XML_DECL}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{REL_LAYOUT}" Target="../slideLayouts/slideLayout{}.xml"/>"#,
            slide.layout().part_index()
        );
        for (rel_id, picture) in pictures {
            let media_name = format!("image{}.{}", media_parts.len() + 1, picture.extension());
            rels.push_str(&format!(
                r#"<Relationship Id="{rel_id}" Type="{REL_IMAGE}" Target="../media/{media_name}"/>"#
            ));
            media_types.insert(picture.extension().clone(), picture.content_type());
            media_parts.push((format!("ppt/media/{media_name}"), picture.bytes()));
        }
        rels.push_str("</Relationships>");
        slide_parts.push((number, xml, rels));
    }

    let media_list: Vec<(String, &'static str)> = media_types.into_iter().collect();
    put(
        &mut zip,
        "[Content_Types].xml",
        parts::content_types(slide_count, &media_list).as_bytes(),
    )?;
    put(&mut zip, "_rels/.rels", ROOT_RELS.as_bytes())?;
    put(&mut zip, "docProps/core.xml", CORE_PROPS.as_bytes())?;
    put(&mut zip, "docProps/app.xml", APP_PROPS.as_bytes())?;
    put(&mut zip, "ppt/presentation.xml", parts::presentation(slide_count).as_bytes())?;
    put(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        parts::presentation_rels(slide_count).as_bytes(),
    )?;
    put(&mut zip, "ppt/presProps.xml", PRES_PROPS.as_bytes())?;
    put(&mut zip, "ppt/viewProps.xml", VIEW_PROPS.as_bytes())?;
    put(&mut zip, "ppt/tableStyles.xml", TABLE_STYLES.as_bytes())?;
    put(&mut zip, "ppt/theme/theme1.xml", THEME.as_bytes())?;
    put(&mut zip, "ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
    put(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        SLIDE_MASTER_RELS.as_bytes(),
    )?;
    for layout in 1..=3 {
        put(
            &mut zip,
            &format!("ppt/slideLayouts/slideLayout{layout}.xml"),
            parts::slide_layout(layout).as_bytes(),
        )?;
        put(
            &mut zip,
            &format!("ppt/slideLayouts/_rels/slideLayout{layout}.xml.rels"),
            LAYOUT_RELS.as_bytes(),
        )?;
    }
    for (number, xml, rels) in &slide_parts {
        put(&mut zip, &format!("ppt/slides/slide{number}.xml"), xml.as_bytes())?;
        put(
            &mut zip,
            &format!("ppt/slides/_rels/slide{number}.xml.rels"),
            rels.as_bytes(),
        )?;
    }
    for (name, bytes) in media_parts {
        put(&mut zip, &name, bytes.as_slice())?;
    }

    let cursor = zip.finish().map_err(package_error)?;
    Ok(cursor.into_inner())
}
