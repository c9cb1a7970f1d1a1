use std::io::Write;
use std::path::Path;
use storyloom_interface::ThemeSource;
use storyloom_storage::SpreadsheetThemeSource;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Themes" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
<si><t>Id</t></si><si><t>Theme</t></si><si><t>Brave Hanuman</t></si><si><t>Friendship &amp; Trust</t></si>
</sst>"#;

const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
<row r="2"><c r="A2"><v>1</v></c><c r="B2" t="s"><v>2</v></c></row>
<row r="3"><c r="A3"><v>2</v></c></row>
<row r="4"><c r="A4"><v>3</v></c><c r="B4" t="s"><v>3</v></c></row>
<row r="5"><c r="A5"><v>4</v></c><c r="B5" t="inlineStr"><is><t>The Golden Deer</t></is></c></row>
</sheetData>
</worksheet>"#;

fn write_workbook(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/sharedStrings.xml", SHARED_STRINGS),
        ("xl/worksheets/sheet1.xml", SHEET),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

#[test]
fn xlsx_themes_are_read_in_row_order_skipping_blanks() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("themes.xlsx");
    write_workbook(&path)?;

    let themes = SpreadsheetThemeSource::default().load(&path)?;

    let texts: Vec<_> = themes.iter().map(|t| t.text().as_str()).collect();
    assert_eq!(
        texts,
        vec!["Brave Hanuman", "Friendship & Trust", "The Golden Deer"]
    );
    let indices: Vec<_> = themes.iter().map(|t| *t.index()).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn xlsx_without_requested_column_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("themes.xlsx");
    write_workbook(&path)?;

    let result = SpreadsheetThemeSource::new("Topic").load(&path);

    assert!(result.is_err());
    Ok(())
}

#[test]
fn corrupt_workbook_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("themes.xlsx");
    std::fs::write(&path, b"Id,Theme\n1,Not really a workbook\n")?;

    assert!(SpreadsheetThemeSource::default().load(&path).is_err());
    Ok(())
}

#[test]
fn csv_themes_are_trimmed_and_numbered() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("themes.csv");
    std::fs::write(
        &path,
        "Id,Theme\n1,  Courage of Arjuna \n2,\n3,\"Sharing, kindness\"\n",
    )?;

    let themes = SpreadsheetThemeSource::default().load(&path)?;

    assert_eq!(themes.len(), 2);
    assert_eq!(themes[0].text(), "Courage of Arjuna");
    assert_eq!(themes[1].text(), "Sharing, kindness");
    assert_eq!(*themes[1].index(), 2);
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("themes.json");
    std::fs::write(&path, b"[\"not a spreadsheet\"]")?;

    assert!(SpreadsheetThemeSource::default().load(&path).is_err());
    Ok(())
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = SpreadsheetThemeSource::default().load(&dir.path().join("absent.xlsx"));
    assert!(result.is_err());
}
