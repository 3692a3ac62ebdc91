// Sitemap XML output

use crate::error::{CoreError, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Write a `<urlset>` document listing `pages` to `sink`.
///
/// Pages are sorted and de-duplicated so the same crawl always produces the
/// same file. URLs are written as given; only XML escaping is applied.
pub fn write_sitemap<'a, I, W>(pages: I, sink: W) -> io::Result<()>
where
    I: IntoIterator<Item = &'a str>,
    W: Write,
{
    let mut pages: Vec<&str> = pages.into_iter().collect();
    pages.sort_unstable();
    pages.dedup();

    let mut writer = Writer::new_with_indent(sink, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for page in pages {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        writer.write_event(Event::Text(BytesText::new(page)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut sink = writer.into_inner();
    sink.write_all(b"\n")?;
    sink.flush()
}

pub fn render_sitemap<'a, I>(pages: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_sitemap(pages, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the sitemap to `path`, replacing any existing file.
pub fn save_sitemap<'a, I>(pages: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let output_error = |source| CoreError::Output {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(output_error)?;
    write_sitemap(pages, BufWriter::new(file)).map_err(output_error)?;

    info!("Sitemap written to {}", path.display());
    Ok(())
}
