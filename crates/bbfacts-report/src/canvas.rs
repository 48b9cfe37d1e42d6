//! Thin SVG drawing layer over a quick-xml writer.

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::common::{LEFT, RIGHT, STYLE_LINK_SPAN};

/// In-memory SVG document under construction.
pub(crate) struct SvgCanvas {
    xml: Writer<Vec<u8>>,
}

impl SvgCanvas {
    pub(crate) fn new() -> Self {
        Self {
            xml: Writer::new(Vec::new()),
        }
    }

    /// Bytes written so far.
    pub(crate) fn position(&self) -> usize {
        self.xml.get_ref().len()
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.xml.into_inner()
    }

    pub(crate) fn declaration(&mut self) -> Result<()> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    pub(crate) fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        element.extend_attributes(attributes.iter().copied());
        self.xml.write_event(Event::Start(element))?;
        Ok(())
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.xml.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub(crate) fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        element.extend_attributes(attributes.iter().copied());
        self.xml.write_event(Event::Empty(element))?;
        Ok(())
    }

    /// `<style>` block wrapped in `<defs>`.
    pub(crate) fn stylesheet(&mut self, css: &str) -> Result<()> {
        self.start("defs", &[])?;
        self.start("style", &[("type", "text/css")])?;
        self.xml.write_event(Event::CData(BytesCData::new(css)))?;
        self.end("style")?;
        self.end("defs")
    }

    pub(crate) fn text(&mut self, x: u32, y: u32, content: &str, style: &str) -> Result<()> {
        self.start_text(x, y, style)?;
        self.xml.write_event(Event::Text(BytesText::new(content)))?;
        self.end("text")
    }

    /// A text element whose tail is a hyperlink: `lead` then a linked `label`.
    pub(crate) fn link_text(
        &mut self,
        x: u32,
        y: u32,
        style: &str,
        lead: &str,
        href: &str,
        label: &str,
    ) -> Result<()> {
        self.start_text(x, y, style)?;
        if !lead.is_empty() {
            self.xml.write_event(Event::Text(BytesText::new(lead)))?;
        }
        self.start("a", &[("xlink:href", href)])?;
        self.start("tspan", &[("style", STYLE_LINK_SPAN)])?;
        self.xml.write_event(Event::Text(BytesText::new(label)))?;
        self.end("tspan")?;
        self.end("a")?;
        self.end("text")
    }

    /// Horizontal separator spanning the content width.
    pub(crate) fn separator(&mut self, y: u32, stroke_width: u32) -> Result<()> {
        let (left, right, y) = (LEFT.to_string(), RIGHT.to_string(), y.to_string());
        let style = format!("stroke:black;stroke-width:{stroke_width}");
        self.empty(
            "line",
            &[
                ("x1", left.as_str()),
                ("y1", y.as_str()),
                ("x2", right.as_str()),
                ("y2", y.as_str()),
                ("style", style.as_str()),
            ],
        )
    }

    fn start_text(&mut self, x: u32, y: u32, style: &str) -> Result<()> {
        let (x, y) = (x.to_string(), y.to_string());
        self.start(
            "text",
            &[("x", x.as_str()), ("y", y.as_str()), ("style", style)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(draw: impl FnOnce(&mut SvgCanvas) -> Result<()>) -> String {
        let mut canvas = SvgCanvas::new();
        draw(&mut canvas).unwrap();
        String::from_utf8(canvas.into_bytes()).unwrap()
    }

    #[test]
    fn text_content_is_escaped() {
        let svg = render(|c| c.text(25, 30, "Fish & Chips <Fiber>", "s"));
        assert_eq!(
            svg,
            r#"<text x="25" y="30" style="s">Fish &amp; Chips &lt;Fiber&gt;</text>"#
        );
    }

    #[test]
    fn link_text_nests_anchor_and_span() {
        let svg = render(|c| c.link_text(40, 50, "s", "Lead ", "https://x.test/?a=1&b=2", "go"));
        assert_eq!(
            svg,
            concat!(
                r#"<text x="40" y="50" style="s">Lead "#,
                r#"<a xlink:href="https://x.test/?a=1&amp;b=2"><tspan style="fill:blue">go</tspan></a></text>"#
            )
        );
    }

    #[test]
    fn separator_spans_content_width() {
        let svg = render(|c| c.separator(75, 12));
        assert_eq!(
            svg,
            r#"<line x1="25" y1="75" x2="580" y2="75" style="stroke:black;stroke-width:12"/>"#
        );
    }
}
